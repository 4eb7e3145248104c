//! Regional emergency strategy prevalence.

use std::collections::BTreeMap;

use lcsi_survey_models::{CleanedObservation, SpatialRow};

/// Emergency prevalence per region and year.
///
/// Produces one row for each region/year pair present in the data, ordered
/// by region name then year. Pairs with no observations produce no row.
/// Observations with an empty region name have no group and are skipped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn spatial_rows(observations: &[CleanedObservation]) -> Vec<SpatialRow> {
    // (region, year) -> (emergency households, all households)
    let mut groups: BTreeMap<(&str, i32), (u64, u64)> = BTreeMap::new();
    let mut skipped = 0_usize;

    for obs in observations {
        if obs.region_name.is_empty() {
            skipped += 1;
            continue;
        }
        let group = groups
            .entry((obs.region_name.as_str(), obs.year))
            .or_insert((0, 0));
        if obs.is_emergency {
            group.0 += 1;
        }
        group.1 += 1;
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} observations without a region name");
    }

    groups
        .into_iter()
        .map(|((region, year), (emergency, total))| SpatialRow {
            region_name: region.to_string(),
            year,
            prevalence_percentage: 100.0 * emergency as f64 / total as f64,
        })
        .collect()
}

/// Upper bound of the map color scale: the largest prevalence across all
/// rows, or `0.0` when there are none.
#[must_use]
pub fn max_prevalence(rows: &[SpatialRow]) -> f64 {
    rows.iter()
        .map(|r| r.prevalence_percentage)
        .fold(0.0, f64::max)
}
