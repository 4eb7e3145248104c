//! Survey extract CSV loader.
//!
//! Reads a survey extract and projects every row onto [`SurveyRecord`]
//! using the configured [`SurveyColumns`]. Extracts from different survey
//! waves name the region column differently, so the region column is looked
//! up by its canonical name first and then by each alias.

use std::fs::File;
use std::path::Path;

use lcsi_survey_models::{SurveyColumns, SurveyRecord};

use crate::LoadError;
use crate::parsing::parse_strategy_code;

/// Header positions of the three projected columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndexes {
    region: usize,
    survey_date: usize,
    strategy_code: usize,
}

impl ColumnIndexes {
    /// Resolves column positions from a header row.
    fn resolve(
        headers: &[String],
        columns: &SurveyColumns,
        path: &Path,
    ) -> Result<Self, LoadError> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let missing = |name: &str| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        };

        let region = position(columns.region.as_str())
            .or_else(|| {
                columns.region_aliases.iter().find_map(|alias| {
                    let idx = position(alias.as_str())?;
                    log::debug!(
                        "{}: renaming column '{alias}' to '{}'",
                        path.display(),
                        columns.region
                    );
                    Some(idx)
                })
            })
            .ok_or_else(|| missing(columns.region.as_str()))?;
        let survey_date = position(columns.survey_date.as_str())
            .ok_or_else(|| missing(columns.survey_date.as_str()))?;
        let strategy_code = position(columns.strategy_code.as_str())
            .ok_or_else(|| missing(columns.strategy_code.as_str()))?;

        Ok(Self {
            region,
            survey_date,
            strategy_code,
        })
    }
}

/// Loads a single survey extract.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, is not valid CSV
/// (including rows with more or fewer fields than the header), or lacks one
/// of the required columns.
pub fn load_survey_file(
    path: &Path,
    columns: &SurveyColumns,
) -> Result<Vec<SurveyRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_error = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Rows whose field count differs from the header are a CSV error.
    let mut reader = csv::ReaderBuilder::new().from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let idx = ColumnIndexes::resolve(&headers, columns, path)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_error)?;
        let cell = |i: usize| row.get(i).unwrap_or("").trim();

        let survey_date = Some(cell(idx.survey_date))
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        records.push(SurveyRecord {
            region_name: cell(idx.region).to_owned(),
            survey_date,
            strategy_code: parse_strategy_code(cell(idx.strategy_code)),
        });
    }

    log::info!(
        "Read {} survey records from {}",
        records.len(),
        path.display()
    );

    Ok(records)
}

/// Loads every extract in `paths`, one record set per file, in order.
///
/// # Errors
///
/// Returns the first [`LoadError`] encountered; no partial result is kept.
pub fn load_survey_files<P: AsRef<Path>>(
    paths: &[P],
    columns: &SurveyColumns,
) -> Result<Vec<Vec<SurveyRecord>>, LoadError> {
    paths
        .iter()
        .map(|path| load_survey_file(path.as_ref(), columns))
        .collect()
}
