#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Survey extract ingestion.
//!
//! Reads LCSI survey CSV extracts into [`SurveyRecord`]s, merges the waves,
//! drops rows whose survey date cannot be parsed, and attaches the coping
//! strategy label to every surviving row.
//!
//! [`SurveyRecord`]: lcsi_survey_models::SurveyRecord

pub mod clean;
pub mod labels;
pub mod loader;
pub mod parsing;

use std::path::PathBuf;

/// Errors that can occur while loading a survey extract.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("Failed to read survey file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid CSV.
    #[error("Malformed survey file {path}: {source}")]
    Csv {
        /// File that failed.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// A required column is missing, even after applying region aliases.
    #[error("Survey file {path} is missing required column '{column}'")]
    MissingColumn {
        /// File that failed.
        path: PathBuf,
        /// Canonical name of the missing column.
        column: String,
    },
}
