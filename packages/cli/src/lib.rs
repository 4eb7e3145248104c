#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LCSI survey pipeline.
//!
//! Loads the survey waves and the Admin1 boundaries, cleans and labels the
//! observations, and writes two standalone HTML charts: the year-over-year
//! coping strategy trend and the animated emergency prevalence map.

pub mod pipeline;

use std::path::PathBuf;

pub use pipeline::{PipelineSummary, run};

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] lcsi_config::ConfigError),

    /// A survey extract could not be loaded.
    #[error(transparent)]
    Load(#[from] lcsi_survey::LoadError),

    /// The boundary file could not be loaded.
    #[error(transparent)]
    Geometry(#[from] lcsi_geography::GeometryLoadError),

    /// A chart could not be rendered or written.
    #[error(transparent)]
    Render(#[from] lcsi_render::RenderError),

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
