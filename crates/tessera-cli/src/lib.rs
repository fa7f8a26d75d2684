//! CLI logic for the Tessera layout tool.
//!
//! Validates a persisted template layout (the JSON instance array the
//! builder saves) against the grid invariants and writes back a
//! normalized copy: column gaps closed, row-major order recomputed.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, LogLevel};
pub use config::ConfigError;

use std::fs;

use log::{info, warn};
use thiserror::Error;

use tessera_core::instance::ModuleInstance;
use tessera_engine::{
    TesseraError,
    grid::GridModel,
    validate::{self, ValidationReport},
};

/// Top-level CLI error.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Engine(#[from] TesseraError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("template layout is invalid")]
    Validation(ValidationReport),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Engine(TesseraError::Io(err))
    }
}

/// Run the Tessera CLI application
///
/// Reads the input layout, validates it, and (unless `--check`) writes
/// the normalized instance array to the output file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed JSON input
/// - Validation errors (duplicate ids, rows over capacity)
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing template layout"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let capacity = app_config.grid().row_capacity();

    // Read and parse the instance array
    let content = fs::read_to_string(&args.input)?;
    let instances: Vec<ModuleInstance> = serde_json::from_str(&content)
        .map_err(|err| TesseraError::Persist(format!("not a JSON instance array: {err}")))?;

    // Validate against the grid invariants
    let report = validate::validate(&instances, capacity);
    if report.has_errors() {
        return Err(CliError::Validation(report));
    }
    for issue in report.issues() {
        warn!(code:% = issue.code(); "{}", issue.message());
    }

    if args.check {
        info!(count = instances.len(), issues = report.issues().len(); "Layout check passed");
        return Ok(());
    }

    // Normalize by round-tripping through the grid
    let grid =
        GridModel::from_instances(instances, app_config.grid()).map_err(TesseraError::from)?;
    let normalized = grid.save();
    let json = serde_json::to_string_pretty(&normalized)
        .map_err(|err| TesseraError::Persist(err.to_string()))?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output, count = normalized.len(); "Normalized layout written");

    Ok(())
}
