#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static chart rendering.
//!
//! Builds Plotly figures for the LCSI trend chart ([`trend`]) and the
//! animated emergency prevalence map ([`choropleth`]), and writes each to a
//! self-contained HTML page that loads Plotly.js from its CDN ([`html`]).
//! Output is deterministic: the same rows always produce the same bytes.

pub mod choropleth;
pub mod figure;
pub mod html;
pub mod trend;

use std::path::PathBuf;

pub use choropleth::{MapOptions, choropleth_figure, write_choropleth_map};
pub use trend::{TrendChartOptions, trend_figure, write_trend_chart};

/// Errors that can occur while rendering a chart to disk.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The figure could not be serialized.
    #[error("Failed to serialize figure: {0}")]
    Json(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Output file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
