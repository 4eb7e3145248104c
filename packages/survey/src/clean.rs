//! Merging survey waves and cleaning their dates.
//!
//! Rows whose survey date is blank or unparseable are dropped and counted.
//! That is a data-quality filter, never an error.

use chrono::Datelike as _;
use lcsi_survey_models::{CleanedObservation, StrategyLabelTable, SurveyRecord};

use crate::labels::{is_emergency, label_for};
use crate::parsing::parse_survey_date;

/// Result of [`clean`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOutcome {
    /// Observations with a valid date and derived fields.
    pub observations: Vec<CleanedObservation>,
    /// Rows dropped because their date could not be parsed.
    pub dropped: usize,
}

/// Concatenates record sets, keeping every row.
#[must_use]
pub fn merge(record_sets: Vec<Vec<SurveyRecord>>) -> Vec<SurveyRecord> {
    let total = record_sets.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);
    for set in record_sets {
        merged.extend(set);
    }
    merged
}

/// Parses dates, derives the survey year, and labels each row.
#[must_use]
pub fn clean(records: Vec<SurveyRecord>, table: &StrategyLabelTable) -> CleanOutcome {
    let mut outcome = CleanOutcome {
        observations: Vec::with_capacity(records.len()),
        dropped: 0,
    };

    for record in records {
        let Some(date) = record.survey_date.as_deref().and_then(parse_survey_date) else {
            outcome.dropped += 1;
            continue;
        };

        let strategy_label = label_for(record.strategy_code, table);
        outcome.observations.push(CleanedObservation {
            region_name: record.region_name,
            survey_date: date,
            year: date.year(),
            strategy_code: record.strategy_code,
            strategy_label,
            is_emergency: is_emergency(strategy_label),
        });
    }

    if outcome.dropped > 0 {
        log::warn!(
            "Dropped {} rows with missing or unparseable survey dates",
            outcome.dropped
        );
    }

    outcome
}
