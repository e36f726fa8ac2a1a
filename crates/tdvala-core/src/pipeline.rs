//! In-memory pipeline: schema text in, output units out.

use crate::config::EmitSettings;
use crate::emit::{Emitter, OutputUnit};
use crate::error::SchemaResult;
use crate::model::{Model, ModelSummary};

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Generation {
    pub summary: ModelSummary,
    pub units: Vec<OutputUnit>,
}

/// Parse `schema`, then render every output unit.
///
/// Nothing is rendered unless the whole schema parses and validates, so a
/// caller that writes only on `Ok` never leaves a partial tree behind.
///
/// # Examples
///
/// ```
/// use tdvala_core::{EmitSettings, generate};
///
/// let schema = "//@description Ok\nok = Ok;\n";
/// let generation = generate(schema, &EmitSettings::default()).unwrap();
///
/// assert_eq!(generation.summary.types, 1);
/// assert!(generation.units.iter().any(|u| u.path.ends_with("ok.vala")));
/// ```
pub fn generate(schema: &str, settings: &EmitSettings) -> SchemaResult<Generation> {
    let model = Model::parse(schema)?;
    let units = Emitter::new(&model, settings).emit_all();

    tracing::info!(
        namespace = %settings.namespace,
        files = units.len(),
        "rendered output units"
    );

    Ok(Generation {
        summary: model.summary(),
        units,
    })
}
