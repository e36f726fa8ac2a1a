//! Project file parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tdvala_core::{EmitSettings, Model};

/// Default project file name, looked up in the working directory.
pub const PROJECT_FILE: &str = "tdvala.toml";

/// tdvala.toml project structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub generator: EmitSettings,

    #[serde(default)]
    pub paths: PathsSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsSection {
    /// Schema file to read
    #[serde(default)]
    pub schema: PathBuf,

    /// Root directory of the generated tree
    #[serde(default)]
    pub output: PathBuf,

    /// Directory whose files are copied into the output root
    #[serde(default)]
    pub support: Option<PathBuf>,
}

/// Values given on the command line; each one replaces the project file's.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub schema: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub support: Option<PathBuf>,
    pub namespace: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl Project {
    /// Load a project from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read project file: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse a project from a string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse project file")
    }

    /// Load the explicit project file, or `tdvala.toml` when present, or start empty.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(PROJECT_FILE).is_file() => Self::from_file(PROJECT_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Apply command line values on top of the file values
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(schema) = overrides.schema {
            self.paths.schema = schema;
        }
        if let Some(output) = overrides.output {
            self.paths.output = output;
        }
        if overrides.support.is_some() {
            self.paths.support = overrides.support;
        }
        if let Some(namespace) = overrides.namespace {
            self.generator.namespace = namespace;
        }
        if let Some(author) = overrides.author {
            self.generator.author = author;
        }
        if overrides.year.is_some() {
            self.generator.year = overrides.year;
        }
        self
    }

    /// Emitter settings, with the copyright year defaulting to the current year
    pub fn settings(&self) -> EmitSettings {
        use chrono::Datelike;

        let mut settings = self.generator.clone();
        if settings.year.is_none() {
            settings.year = Some(chrono::Local::now().year());
        }
        settings
    }

    /// Validate the project
    pub fn validate(&self) -> Result<()> {
        let generator = &self.generator;

        if generator.namespace.is_empty() {
            anyhow::bail!("Namespace cannot be empty");
        }

        if generator.license.trim().is_empty() {
            anyhow::bail!("License identifier cannot be empty");
        }

        let names = [
            ("namespace", &generator.namespace),
            ("client class", &generator.client_class),
            ("dispatcher class", &generator.dispatcher_class),
            ("error type", &generator.error_type),
            ("root class", &generator.root_class),
        ];
        for (what, name) in names {
            if !is_identifier(name) {
                anyhow::bail!("Invalid {what}: '{name}' is not a Vala identifier");
            }
        }

        if self.paths.schema.as_os_str().is_empty() {
            anyhow::bail!("Schema path cannot be empty");
        }

        if self.paths.output.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }

        if let Some(year) = generator.year
            && !(1970..=9999).contains(&year)
        {
            anyhow::bail!("Copyright year out of range: {year}");
        }

        Ok(())
    }
}

/// Check if a string is a plain identifier
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Check command implementation
pub fn check(project_path: Option<PathBuf>) -> Result<()> {
    let path = project_path.unwrap_or_else(|| PathBuf::from(PROJECT_FILE));

    println!("Checking project: {}", path.display());

    let project = Project::from_file(&path)?;
    project.validate()?;

    let schema = std::fs::read_to_string(&project.paths.schema)
        .with_context(|| format!("Failed to read schema: {:?}", project.paths.schema))?;
    let model = Model::parse(&schema)
        .with_context(|| format!("Invalid schema: {:?}", project.paths.schema))?;
    let summary = model.summary();

    println!("✓ Namespace: {}", project.generator.namespace);
    if !project.generator.author.trim().is_empty() {
        println!("✓ Author: {}", project.generator.author);
    }
    println!(
        "✓ Types: {} ({} families, {} concrete, {} constructors)",
        summary.types, summary.families, summary.concrete, summary.constructors
    );
    println!(
        "✓ Functions: {} ({} synchronous)",
        summary.functions, summary.sync_functions
    );
    println!("\nProject is valid!");

    Ok(())
}

#[cfg(test)]
#[path = "project/project_tests.rs"]
mod project_tests;
