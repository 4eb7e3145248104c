//! Year-over-year coping strategy trend.
//!
//! Every observation of a year counts toward that year's denominator,
//! including households with no strategy and households whose code has no
//! label. Only the tracked categories are emitted as [`TrendRow`]s.

use std::collections::BTreeMap;

use lcsi_survey_models::{CleanedObservation, StrategyLabel, TrendRow};

/// Observation counts for a single survey year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearTally {
    /// All observations in the year.
    pub total: u64,
    /// Observations per label.
    pub by_label: BTreeMap<StrategyLabel, u64>,
    /// Observations whose code has no label.
    pub unlabeled: u64,
}

impl YearTally {
    /// Observations carrying `label`.
    #[must_use]
    pub fn count(&self, label: StrategyLabel) -> u64 {
        self.by_label.get(&label).copied().unwrap_or(0)
    }

    fn record(&mut self, label: Option<StrategyLabel>) {
        self.total += 1;
        match label {
            Some(label) => *self.by_label.entry(label).or_insert(0) += 1,
            None => self.unlabeled += 1,
        }
    }
}

/// Counts observations per year and label.
#[must_use]
pub fn tally_by_year(observations: &[CleanedObservation]) -> BTreeMap<i32, YearTally> {
    let mut tallies: BTreeMap<i32, YearTally> = BTreeMap::new();
    for obs in observations {
        tallies
            .entry(obs.year)
            .or_default()
            .record(obs.strategy_label);
    }
    tallies
}

/// Percentage of households per tracked category and year.
///
/// Rows are ordered Stress, Crisis, Emergency, each by ascending year.
/// A category with no households in a year has no row for that year.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trend_rows(observations: &[CleanedObservation]) -> Vec<TrendRow> {
    let tallies = tally_by_year(observations);

    let mut rows = Vec::new();
    for category in StrategyLabel::TRACKED {
        for (&year, tally) in &tallies {
            let count = tally.count(category);
            if count == 0 {
                continue;
            }
            rows.push(TrendRow {
                year,
                category,
                count,
                total_for_year: tally.total,
                percentage: 100.0 * count as f64 / tally.total as f64,
            });
        }
    }

    log::debug!(
        "Computed {} trend rows across {} years",
        rows.len(),
        tallies.len()
    );

    rows
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn obs(year: i32, label: Option<StrategyLabel>) -> CleanedObservation {
        CleanedObservation {
            region_name: "Harare".to_string(),
            survey_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            year,
            strategy_code: None,
            strategy_label: label,
            is_emergency: label == Some(StrategyLabel::Emergency),
        }
    }

    fn sample() -> Vec<CleanedObservation> {
        vec![
            obs(2023, Some(StrategyLabel::Emergency)),
            obs(2021, Some(StrategyLabel::Stress)),
            obs(2021, Some(StrategyLabel::None)),
            obs(2021, Some(StrategyLabel::Crisis)),
            obs(2021, None),
            obs(2023, Some(StrategyLabel::Stress)),
            obs(2023, Some(StrategyLabel::Stress)),
            obs(2022, Some(StrategyLabel::None)),
        ]
    }

    #[test]
    fn tally_counts_sum_to_year_total() {
        for (year, tally) in tally_by_year(&sample()) {
            let labeled: u64 = tally.by_label.values().sum();
            assert_eq!(
                labeled + tally.unlabeled,
                tally.total,
                "counts for {year} do not sum to the total"
            );
        }
    }

    #[test]
    fn denominator_includes_none_and_unknown() {
        let rows = trend_rows(&sample());
        let stress_2021 = rows
            .iter()
            .find(|r| r.year == 2021 && r.category == StrategyLabel::Stress)
            .unwrap();
        assert_eq!(stress_2021.count, 1);
        assert_eq!(stress_2021.total_for_year, 4);
        assert!((stress_2021.percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn tracked_percentages_never_exceed_one_hundred() {
        let rows = trend_rows(&sample());
        let mut per_year: BTreeMap<i32, f64> = BTreeMap::new();
        for row in &rows {
            *per_year.entry(row.year).or_insert(0.0) += row.percentage;
        }
        for (year, sum) in per_year {
            assert!(sum <= 100.0 + 1e-9, "{year} sums to {sum}");
        }
        let sum_2023: f64 = rows
            .iter()
            .filter(|r| r.year == 2023)
            .map(|r| r.percentage)
            .sum();
        assert!((sum_2023 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rows_follow_category_then_year_order() {
        let rows = trend_rows(&sample());
        let keys: Vec<(StrategyLabel, i32)> = rows.iter().map(|r| (r.category, r.year)).collect();
        assert_eq!(
            keys,
            vec![
                (StrategyLabel::Stress, 2021),
                (StrategyLabel::Stress, 2023),
                (StrategyLabel::Crisis, 2021),
                (StrategyLabel::Emergency, 2023),
            ]
        );
    }

    #[test]
    fn none_category_is_never_emitted() {
        assert!(
            trend_rows(&sample())
                .iter()
                .all(|r| r.category != StrategyLabel::None)
        );
    }

    #[test]
    fn aggregation_is_deterministic() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(trend_rows(&sample()), trend_rows(&sample()));
        assert_eq!(trend_rows(&sample()), trend_rows(&reversed));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(trend_rows(&[]).is_empty());
        assert!(tally_by_year(&[]).is_empty());
    }
}
