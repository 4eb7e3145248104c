#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Admin1 boundary management.
//!
//! Loads region polygons from a `GeoJSON` `FeatureCollection` and works out
//! which feature property carries the human-readable region name, so that
//! tabular region names can be joined to polygons.

pub mod boundaries;
pub mod name_key;

use std::path::PathBuf;

use thiserror::Error;

pub use boundaries::{RegionGeometry, RegionMatch};
pub use name_key::{KeyResolution, NameKey, resolve_name_key};

/// Errors that can occur while loading boundary geometry.
#[derive(Debug, Error)]
pub enum GeometryLoadError {
    /// The file could not be opened or read.
    #[error("Failed to read geometry file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The contents are not valid `GeoJSON`.
    #[error("GeoJSON parse error: {0}")]
    Parse(#[from] geojson::Error),

    /// Valid `GeoJSON`, but not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection, found a {found}")]
    NotFeatureCollection {
        /// The `GeoJSON` object type that was found instead.
        found: &'static str,
    },
}
