//! Inspect command: parse a schema and report what the model contains.

use anyhow::{Context, Result};
use std::path::Path;
use tdvala_core::Model;
use tdvala_core::model::TypeShape;

/// Run the inspect command
pub fn run(schema_path: &Path, json: bool) -> Result<()> {
    let schema = std::fs::read_to_string(schema_path)
        .with_context(|| format!("Failed to read schema: {schema_path:?}"))?;
    let model =
        Model::parse(&schema).with_context(|| format!("Invalid schema: {schema_path:?}"))?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&model).context("Failed to serialize model")?;
        println!("{rendered}");
    } else {
        print!("{}", render_summary(&model));
    }

    Ok(())
}

/// Human-readable overview: counts, then one line per type.
pub fn render_summary(model: &Model) -> String {
    let summary = model.summary();
    let mut out = String::new();

    out.push_str(&format!(
        "Types: {} ({} families, {} concrete)\n",
        summary.types, summary.families, summary.concrete
    ));
    out.push_str(&format!("Constructors: {}\n", summary.constructors));
    out.push_str(&format!(
        "Functions: {} ({} synchronous)\n",
        summary.functions, summary.sync_functions
    ));

    for ty in model.types.values() {
        match ty.shape() {
            TypeShape::Concrete(_) => out.push_str(&format!("  {}\n", ty.name)),
            TypeShape::Family => out.push_str(&format!(
                "  {} [{}]\n",
                ty.name,
                ty.constructors.keys().cloned().collect::<Vec<_>>().join(", ")
            )),
        }
    }

    out
}
