//! Generate command: read the schema, render the client, write the tree.

use crate::project::{Overrides, Project};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tdvala_core::OutputUnit;

/// Run the generate command
pub fn run(project_path: Option<PathBuf>, overrides: Overrides) -> Result<()> {
    let project = Project::discover(project_path.as_deref())?.apply(overrides);
    project.validate()?;

    let settings = project.settings();
    let schema_path = &project.paths.schema;
    let output = &project.paths.output;

    let schema = fs::read_to_string(schema_path)
        .with_context(|| format!("Failed to read schema: {schema_path:?}"))?;

    tracing::info!(schema = %schema_path.display(), "parsing schema");
    let generation = tdvala_core::generate(&schema, &settings)
        .with_context(|| format!("Failed to generate from {schema_path:?}"))?;

    let written = write_units(output, &generation.units)?;

    let copied = match &project.paths.support {
        Some(support) => copy_support(support, output)?,
        None => 0,
    };

    println!(
        "✓ Types: {} ({} families)",
        generation.summary.types, generation.summary.families
    );
    println!(
        "✓ Functions: {} ({} synchronous)",
        generation.summary.functions, generation.summary.sync_functions
    );
    println!("✓ Wrote {written} files to {}", output.display());
    if copied > 0 {
        println!("✓ Copied {copied} support files");
    }

    Ok(())
}

/// Write every unit under `root`, creating directories as needed.
pub fn write_units(root: &Path, units: &[OutputUnit]) -> Result<usize> {
    for unit in units {
        let path = root.join(&unit.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }

        fs::write(&path, &unit.contents).with_context(|| format!("Failed to write {path:?}"))?;
        tracing::debug!(path = %path.display(), "wrote");
    }

    Ok(units.len())
}

/// Recursively copy the files under `from` into `to`. Returns the file count.
pub fn copy_support(from: &Path, to: &Path) -> Result<usize> {
    if !from.is_dir() {
        anyhow::bail!("Support directory does not exist: {from:?}");
    }

    fs::create_dir_all(to).with_context(|| format!("Failed to create directory: {to:?}"))?;

    let mut entries = fs::read_dir(from)
        .with_context(|| format!("Failed to read directory: {from:?}"))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read directory: {from:?}"))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut copied = 0;
    for entry in entries {
        let source = entry.path();
        let target = to.join(entry.file_name());

        if source.is_dir() {
            copied += copy_support(&source, &target)?;
        } else {
            fs::copy(&source, &target)
                .with_context(|| format!("Failed to copy {source:?} to {target:?}"))?;
            tracing::debug!(from = %source.display(), to = %target.display(), "copied support file");
            copied += 1;
        }
    }

    Ok(copied)
}
