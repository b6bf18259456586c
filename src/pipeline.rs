//! The scan → build → emit → write pipeline.
//!
//! Every run recomputes the module from a fresh directory listing and
//! overwrites the output file in full.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::discovery::scan_assets;
use crate::emit::{emit_module, EmitOptions};
use crate::error::{AssetsGenError, Result};
use crate::output::{display_path, plural, Logger};
use crate::tree::{build_tree, Collision};

/// Outcome of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    /// Number of supported files found under the asset root.
    pub asset_count: usize,
    pub collisions: Vec<Collision>,
}

/// Render the module for the current state of the asset root without
/// writing it.
pub fn render(config: &Config, project_root: &Path, logger: &dyn Logger) -> Result<(String, GenerateReport)> {
    let assets_path = config.assets_path(project_root);
    let output_path = config.output_path(project_root);

    let records = scan_assets(&assets_path, logger)?;
    let build = build_tree(&records, config.svg.as_component, logger);
    let module = emit_module(&build.tree, &EmitOptions::new(project_root, &output_path));

    let report = GenerateReport {
        output_path,
        asset_count: records.len(),
        collisions: build.collisions,
    };

    Ok((module, report))
}

/// Run the full pipeline and write the output module.
pub fn generate(config: &Config, project_root: &Path, logger: &dyn Logger) -> Result<GenerateReport> {
    let (module, report) = render(config, project_root, logger)?;
    write_module(&report.output_path, &module)?;

    logger.success(&format!(
        "Generated {} ({})",
        display_path(&report.output_path),
        plural(report.asset_count, "asset", "assets")
    ));

    Ok(report)
}

/// Write the module, creating parent directories as needed.
fn write_module(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| AssetsGenError::io(parent, "Failed to create output directory", e))?;
        }
    }

    fs::write(path, contents).map_err(|e| AssetsGenError::io(path, "Failed to write output", e))
}
