//! tdvala-core - TDLib schema parser and Vala client generator
//!
//! This crate turns the line-oriented TDLib API schema into the sources of a
//! typed Vala client library:
//! - [`naming`] converts identifiers and resolves schema type tokens
//! - [`schema`] classifies lines and parses documentation tags
//! - [`model`] builds and validates the [`Model`]
//! - [`emit`] renders type, request, client and dispatcher files
//! - [`generate`] runs the whole pipeline in memory

pub mod config;
pub mod emit;
mod error;
pub mod model;
pub mod naming;
mod pipeline;
pub mod schema;

pub use config::{EmitSettings, LogLevel};
pub use emit::{Emitter, OutputUnit};
pub use error::{SchemaError, SchemaResult};
pub use model::{Model, ModelSummary};
pub use pipeline::{Generation, generate};
