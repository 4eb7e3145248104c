#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LCSI pipeline configuration.
//!
//! Everything that varies between countries or datasets (input and output
//! paths, column names, the code -> label table, and the boundary name key
//! preferences) lives in a [`PipelineConfig`]. The Zimbabwe configuration
//! is embedded at compile time from `config/zimbabwe.toml`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use lcsi_survey_models::{StrategyLabelTable, SurveyColumns};
use serde::{Deserialize, Serialize};

/// Embedded Zimbabwe configuration.
const ZIMBABWE_TOML: &str = include_str!("../config/zimbabwe.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML could not be parsed into a [`PipelineConfig`].
    #[error("Invalid configuration TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration parsed but is not usable.
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input files.
    pub inputs: InputPaths,
    /// Survey column names.
    #[serde(default)]
    pub columns: SurveyColumns,
    /// Output location and filenames.
    pub outputs: OutputPaths,
    /// Boundary name key resolution.
    #[serde(default)]
    pub geometry: GeometrySettings,
    /// LCSI code -> label table.
    #[serde(default)]
    pub strategy_labels: StrategyLabelTable,
}

/// Input files of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPaths {
    /// Survey extracts, one per wave.
    pub survey_files: Vec<PathBuf>,
    /// Admin1 boundary `GeoJSON`.
    pub geometry_file: PathBuf,
}

/// Where rendered charts are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    /// Output directory, created if missing.
    pub directory: PathBuf,
    /// Trend chart filename.
    pub trend_chart: String,
    /// Map filename.
    pub map: String,
}

impl OutputPaths {
    /// Full path of the trend chart.
    #[must_use]
    pub fn trend_chart_path(&self) -> PathBuf {
        self.directory.join(&self.trend_chart)
    }

    /// Full path of the map.
    #[must_use]
    pub fn map_path(&self) -> PathBuf {
        self.directory.join(&self.map)
    }
}

/// How the region name property of boundary features is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometrySettings {
    /// Candidate property names, most preferred first.
    pub name_key_preferences: Vec<String>,
    /// Property used when no candidate is present.
    pub default_name_key: String,
    /// Explicit property name. Skips the candidate search when set.
    #[serde(default)]
    pub name_key: Option<String>,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            name_key_preferences: ["ADM1_EN", "ADM1_NAME", "admin1Name", "name", "NAME"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            default_name_key: "ADM1_EN".to_string(),
            name_key: None,
        }
    }
}

impl PipelineConfig {
    /// The embedded Zimbabwe configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded TOML is invalid.
    pub fn zimbabwe() -> Result<Self, ConfigError> {
        Self::from_toml_str(ZIMBABWE_TOML)
    }

    /// Parses and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed TOML and
    /// [`ConfigError::Invalid`] if [`Self::validate`] fails.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        log::debug!(
            "Loaded configuration with {} survey files",
            config.inputs.survey_files.len()
        );
        Ok(config)
    }

    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::Invalid {
                message: message.to_string(),
            })
        };

        if self.inputs.survey_files.is_empty() {
            return invalid("inputs.survey_files must list at least one file");
        }
        if self.outputs.trend_chart.trim().is_empty() || self.outputs.map.trim().is_empty() {
            return invalid("output filenames must not be empty");
        }
        if self.outputs.trend_chart == self.outputs.map {
            return invalid("trend chart and map must have different filenames");
        }
        if self.geometry.default_name_key.trim().is_empty() {
            return invalid("geometry.default_name_key must not be empty");
        }
        if self
            .geometry
            .name_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            return invalid("geometry.name_key must not be empty when set");
        }

        let mut codes = BTreeSet::new();
        for entry in self.strategy_labels.entries() {
            if !codes.insert(entry.code) {
                return Err(ConfigError::Invalid {
                    message: format!("strategy label code {} is listed twice", entry.code),
                });
            }
        }

        Ok(())
    }
}
