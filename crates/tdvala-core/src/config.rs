//! Generator configuration types

use serde::{Deserialize, Serialize};

/// Settings that shape the emitted sources.
///
/// None of these affect parsing; they only feed file naming, class naming and
/// header stamping in [`crate::emit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitSettings {
    /// Vala namespace every emitted class lives in
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Copyright holder stamped into every file header
    #[serde(default)]
    pub author: String,

    /// SPDX license identifier stamped into every file header
    #[serde(default = "default_license")]
    pub license: String,

    /// Copyright year; omitted from the header when unset
    #[serde(default)]
    pub year: Option<i32>,

    /// Name of the client façade class
    #[serde(default = "default_client_class")]
    pub client_class: String,

    /// Name of the push-notification dispatcher class
    #[serde(default = "default_dispatcher_class")]
    pub dispatcher_class: String,

    /// Type that is emitted without a type tag and correlation id
    #[serde(default = "default_error_type")]
    pub error_type: String,

    /// Abstract class at the root of every emitted object
    #[serde(default = "default_root_class")]
    pub root_class: String,
}

fn default_namespace() -> String {
    "TDLib".to_string()
}

fn default_license() -> String {
    "GPL-3.0-or-later".to_string()
}

fn default_client_class() -> String {
    "Client".to_string()
}

fn default_dispatcher_class() -> String {
    "RequestsManager".to_string()
}

fn default_error_type() -> String {
    "Error".to_string()
}

fn default_root_class() -> String {
    "TDObject".to_string()
}

impl Default for EmitSettings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            author: String::new(),
            license: default_license(),
            year: None,
            client_class: default_client_class(),
            dispatcher_class: default_dispatcher_class(),
            error_type: default_error_type(),
            root_class: default_root_class(),
        }
    }
}

impl EmitSettings {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Log verbosity accepted by the command line and project file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
