//! # Output Rendering
//!
//! Serializes the flat model for stdout. YAML is the default — the output
//! feeds vars files written in the same format as the input — with JSON
//! available for consumers that want it. Both forms are byte-stable for a
//! given model: collection keys serialize in a fixed order and records in
//! traversal order.

use anyhow::{Context, Result};
use clap::ValueEnum;

use acifab_core::FlatModel;

/// Wire format for the rendered collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML document, the downstream vars-file format.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Render the model in the requested format, trailing newline included.
pub fn render(model: &FlatModel, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(model).context("unable to render flat model as YAML")
        }
        OutputFormat::Json => serde_json::to_string_pretty(model)
            .map(|rendered| rendered + "\n")
            .context("unable to render flat model as JSON"),
    }
}
