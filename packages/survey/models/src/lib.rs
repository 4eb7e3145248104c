#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Livelihood coping strategy (LCSI) survey types.
//!
//! Defines the canonical record shape every survey extract is projected
//! into, the coping strategy taxonomy, and the aggregate rows produced by
//! the trend and spatial analyses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// LCSI coping strategy severity, from no coping strategy at all to
/// emergency strategies (e.g. selling the last female animals).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum StrategyLabel {
    /// The household reported no coping strategy.
    None,
    /// Stress strategies (borrowing money, spending savings).
    Stress,
    /// Crisis strategies (reducing essential health or education spending).
    Crisis,
    /// Emergency strategies (begging, selling land or last animals).
    Emergency,
}

impl StrategyLabel {
    /// Categories that are charted, in their fixed render order.
    pub const TRACKED: [Self; 3] = [Self::Stress, Self::Crisis, Self::Emergency];
}

/// A single code -> label assignment in a [`StrategyLabelTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyLabelEntry {
    /// Integer code as it appears in the survey extract.
    pub code: i64,
    /// Label assigned to that code.
    pub label: StrategyLabel,
}

/// Mapping from raw LCSI integer codes to [`StrategyLabel`]s.
///
/// Codes missing from the table have no label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyLabelTable {
    entries: Vec<StrategyLabelEntry>,
}

impl StrategyLabelTable {
    /// Creates a table from explicit entries. When a code appears more than
    /// once the first entry wins.
    #[must_use]
    pub const fn new(entries: Vec<StrategyLabelEntry>) -> Self {
        Self { entries }
    }

    /// The standard LCSI coding: `0 -> None`, `1 -> Stress`,
    /// `2 -> Crisis`, `3 -> Emergency`.
    #[must_use]
    pub fn lcsi() -> Self {
        Self::new(vec![
            StrategyLabelEntry {
                code: 0,
                label: StrategyLabel::None,
            },
            StrategyLabelEntry {
                code: 1,
                label: StrategyLabel::Stress,
            },
            StrategyLabelEntry {
                code: 2,
                label: StrategyLabel::Crisis,
            },
            StrategyLabelEntry {
                code: 3,
                label: StrategyLabel::Emergency,
            },
        ])
    }

    /// Looks up the label for `code`.
    #[must_use]
    pub fn label(&self, code: i64) -> Option<StrategyLabel> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.label)
    }

    /// Returns the raw entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[StrategyLabelEntry] {
        &self.entries
    }
}

impl Default for StrategyLabelTable {
    fn default() -> Self {
        Self::lcsi()
    }
}

/// Column names used to project a survey extract onto [`SurveyRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyColumns {
    /// Canonical region column.
    pub region: String,
    /// Alternate spellings of the region column, renamed to
    /// [`Self::region`] when the canonical column is absent.
    #[serde(default)]
    pub region_aliases: Vec<String>,
    /// Survey date column.
    pub survey_date: String,
    /// LCSI code column.
    pub strategy_code: String,
}

impl Default for SurveyColumns {
    fn default() -> Self {
        Self {
            region: "adm1_name".to_string(),
            region_aliases: vec!["Admin 1 name".to_string()],
            survey_date: "survey_date".to_string(),
            strategy_code: "lcsi".to_string(),
        }
    }
}

/// One household response, projected from a survey extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    /// Admin1 region name (province).
    pub region_name: String,
    /// Raw survey date text. `None` for blank cells.
    pub survey_date: Option<String>,
    /// LCSI code. `None` for blank or non-integer cells.
    pub strategy_code: Option<i64>,
}

/// A [`SurveyRecord`] with a parsed date and derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedObservation {
    /// Admin1 region name (province).
    pub region_name: String,
    /// Parsed survey date.
    pub survey_date: NaiveDate,
    /// Calendar year of [`Self::survey_date`].
    pub year: i32,
    /// LCSI code as read from the extract.
    pub strategy_code: Option<i64>,
    /// Label for the code, `None` when the code is unknown.
    pub strategy_label: Option<StrategyLabel>,
    /// Whether the household used an emergency strategy.
    pub is_emergency: bool,
}

/// Share of households in one category for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    /// Survey year.
    pub year: i32,
    /// Coping strategy category.
    pub category: StrategyLabel,
    /// Households in this category and year.
    pub count: u64,
    /// All households surveyed that year, whatever their label.
    pub total_for_year: u64,
    /// `100 * count / total_for_year`.
    pub percentage: f64,
}

/// Emergency strategy prevalence for one region and year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialRow {
    /// Admin1 region name.
    pub region_name: String,
    /// Survey year.
    pub year: i32,
    /// Percentage of households using emergency strategies.
    pub prevalence_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcsi_table_is_total_over_known_codes() {
        let table = StrategyLabelTable::lcsi();
        assert_eq!(table.label(0), Some(StrategyLabel::None));
        assert_eq!(table.label(1), Some(StrategyLabel::Stress));
        assert_eq!(table.label(2), Some(StrategyLabel::Crisis));
        assert_eq!(table.label(3), Some(StrategyLabel::Emergency));
    }

    #[test]
    fn unknown_codes_have_no_label() {
        let table = StrategyLabelTable::lcsi();
        assert_eq!(table.label(-1), None);
        assert_eq!(table.label(4), None);
        assert_eq!(table.label(99), None);
    }

    #[test]
    fn first_duplicate_entry_wins() {
        let table = StrategyLabelTable::new(vec![
            StrategyLabelEntry {
                code: 1,
                label: StrategyLabel::Crisis,
            },
            StrategyLabelEntry {
                code: 1,
                label: StrategyLabel::Stress,
            },
        ]);
        assert_eq!(table.label(1), Some(StrategyLabel::Crisis));
    }

    #[test]
    fn labels_display_as_variant_names() {
        assert_eq!(StrategyLabel::Emergency.to_string(), "Emergency");
        assert_eq!(StrategyLabel::None.as_ref(), "None");
        assert_eq!(
            "Crisis".parse::<StrategyLabel>().unwrap(),
            StrategyLabel::Crisis
        );
    }

    #[test]
    fn table_serializes_as_entry_list() {
        let json = serde_json::to_value(StrategyLabelTable::lcsi()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3]["code"], 3);
        assert_eq!(entries[3]["label"], "Emergency");
    }
}
