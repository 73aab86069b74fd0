//! CLI logic for the Relayout tool.
//!
//! Reads a diagram snapshot and an optional change set from JSON, runs one
//! incremental layout pass and writes the resulting snapshot back as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{debug, info};
use serde::de::DeserializeOwned;

use relayout::{
    LayoutBuilder, LayoutRequest, RelayoutError, image_file::FileImageMeasure, semantic::Diagram,
};

/// Run the Relayout CLI application
///
/// This function lays out the input snapshot, applying the change set when
/// one is given, and writes the resulting snapshot to the output file.
/// Relative image paths in the snapshot are resolved against the input
/// file's directory.
///
/// # Errors
///
/// Returns `RelayoutError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed snapshot or change set JSON
/// - Duplicate ids or unusable requested geometry
pub fn run(args: &Args) -> Result<(), RelayoutError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let diagram: Diagram = read_json(&args.input)?;
    let request = match &args.changes {
        Some(path) => read_json(path)?,
        None => LayoutRequest::default(),
    };
    debug!(
        moved = request.moved().len(),
        resized = request.resized().len();
        "Loaded change set"
    );

    let image_measure = match Path::new(&args.input).parent() {
        Some(dir) => FileImageMeasure::new().with_base_dir(dir),
        None => FileImageMeasure::new(),
    };
    let builder = LayoutBuilder::new(app_config).with_image_measure(image_measure);
    let (output, report) = builder.layout_with_report(&diagram, &request)?;

    let json = serde_json::to_string_pretty(&output)
        .map_err(|err| RelayoutError::Serialization(err.to_string()))?;
    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        nodes_changed = report.nodes_changed,
        edges_rerouted = report.edges_rerouted;
        "Snapshot written successfully"
    );

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, RelayoutError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|err| RelayoutError::Serialization(format!("{}: {err}", path.display())))
}
