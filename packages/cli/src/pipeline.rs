//! End-to-end pipeline run.
//!
//! Every input (survey waves and boundaries) is loaded before any output is
//! written, so a missing file never leaves a half-finished output directory.

use std::path::PathBuf;
use std::time::Instant;

use lcsi_analytics::{spatial_rows, trend_rows};
use lcsi_cli_utils::ProgressCallback;
use lcsi_config::PipelineConfig;
use lcsi_geography::{NameKey, RegionGeometry, RegionMatch, resolve_name_key};
use lcsi_render::{MapOptions, TrendChartOptions, write_choropleth_map, write_trend_chart};
use lcsi_survey::clean::{clean, merge};
use lcsi_survey::loader::load_survey_files;

use crate::PipelineError;

/// Number of stages reported through [`ProgressCallback::inc`].
pub const STAGES: u64 = 4;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Rows read across all survey files.
    pub records_loaded: usize,
    /// Rows dropped for an unparseable survey date.
    pub dropped_rows: usize,
    /// Rows that survived cleaning.
    pub observations: usize,
    /// Rows in the trend table.
    pub trend_rows: usize,
    /// Rows in the spatial table.
    pub spatial_rows: usize,
    /// Boundary property the map was joined on.
    pub name_key: NameKey,
    /// Which regions found a boundary feature.
    pub region_match: RegionMatch,
    /// Written trend chart.
    pub trend_chart: PathBuf,
    /// Written map.
    pub map: PathBuf,
}

/// Runs the pipeline described by `config`.
///
/// # Errors
///
/// * [`PipelineError::Load`] if a survey file is missing, malformed, or lacks
///   a required column
/// * [`PipelineError::Geometry`] if the boundary file cannot be read or is
///   not a feature collection
/// * [`PipelineError::OutputDir`] if the output directory cannot be created
/// * [`PipelineError::Render`] if a chart cannot be written
pub fn run(
    config: &PipelineConfig,
    progress: &dyn ProgressCallback,
) -> Result<PipelineSummary, PipelineError> {
    let start = Instant::now();
    progress.set_total(STAGES);

    progress.status("Loading data...");
    progress.set_message("Loading".to_string());
    let record_sets = load_survey_files(&config.inputs.survey_files, &config.columns)?;
    let geometry = RegionGeometry::load(&config.inputs.geometry_file)?;
    let records = merge(record_sets);
    let records_loaded = records.len();
    log::info!(
        "Loaded {records_loaded} survey rows from {} files and {} boundary features",
        config.inputs.survey_files.len(),
        geometry.features().len()
    );
    progress.inc(1);

    progress.status("Processing dates...");
    progress.set_message("Cleaning".to_string());
    let cleaned = clean(records, &config.strategy_labels);
    let observations = cleaned.observations;
    log::info!(
        "{} observations after cleaning ({} dropped)",
        observations.len(),
        cleaned.dropped
    );
    if cleaned.dropped > 0 {
        progress.status(&format!(
            "Dropped {} rows with missing or unparseable survey dates",
            cleaned.dropped
        ));
    }
    progress.inc(1);

    std::fs::create_dir_all(&config.outputs.directory).map_err(|source| {
        PipelineError::OutputDir {
            path: config.outputs.directory.clone(),
            source,
        }
    })?;

    progress.status("Analyzing LCSI trends...");
    progress.set_message("Trend chart".to_string());
    let trends = trend_rows(&observations);
    let trend_chart = config.outputs.trend_chart_path();
    write_trend_chart(&trend_chart, &trends, &TrendChartOptions::default())?;
    progress.status(&format!("Saved trend chart to {}", trend_chart.display()));
    progress.inc(1);

    progress.status("Generating spatial map...");
    progress.set_message("Map".to_string());
    let spatial = spatial_rows(&observations);
    let name_key = config.geometry.name_key.as_ref().map_or_else(
        || {
            resolve_name_key(
                geometry.first_properties(),
                &config.geometry.name_key_preferences,
                &config.geometry.default_name_key,
            )
        },
        NameKey::configured,
    );
    if name_key.is_fallback() {
        progress.status(&format!(
            "Using GeoJSON key: {name_key} (fallback; no candidate key found)"
        ));
    } else {
        progress.status(&format!("Using GeoJSON key: {name_key}"));
    }

    let region_match =
        geometry.match_regions(&name_key, spatial.iter().map(|r| r.region_name.as_str()));
    if region_match.matched.is_empty() && !region_match.unmatched.is_empty() {
        let notice = format!(
            "Warning: no survey region matches a boundary feature under {name_key}; \
             the map will be blank"
        );
        log::warn!("{notice}");
        progress.status(&notice);
    } else if !region_match.unmatched.is_empty() {
        log::warn!(
            "{} regions have no boundary feature under {name_key}: {}",
            region_match.unmatched.len(),
            region_match.unmatched.join(", ")
        );
    }

    let map = config.outputs.map_path();
    write_choropleth_map(
        &map,
        &spatial,
        geometry.collection(),
        &name_key,
        &MapOptions::default(),
    )?;
    progress.status(&format!("Saved map to {}", map.display()));
    progress.inc(1);

    progress.status("Done.");
    progress.finish_and_clear();
    log::info!("Pipeline finished in {:.2?}", start.elapsed());

    Ok(PipelineSummary {
        records_loaded,
        dropped_rows: cleaned.dropped,
        observations: observations.len(),
        trend_rows: trends.len(),
        spatial_rows: spatial.len(),
        name_key,
        region_match,
        trend_chart,
        map,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use lcsi_cli_utils::NullProgress;
    use lcsi_config::{GeometrySettings, InputPaths, OutputPaths};
    use lcsi_geography::KeyResolution;
    use lcsi_survey_models::{StrategyLabelTable, SurveyColumns};

    use super::*;

    const WAVE_2021: &str = "\
adm1_name,survey_date,lcsi
Harare,2021-11-02,3
Harare,2021-11-03,1
Bulawayo,2021-11-04,0
Bulawayo,not a date,2
";

    const WAVE_2023: &str = "\
Admin 1 name,survey_date,lcsi
Harare,2023-06-10,2
Bulawayo,2023-06-11,3
";

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "ADM1_EN": "Harare" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[31.0, -17.9], [31.1, -17.9], [31.1, -17.8], [31.0, -17.9]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "ADM1_EN": "Bulawayo" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[28.5, -20.2], [28.6, -20.2], [28.6, -20.1], [28.5, -20.2]]]
                }
            }
        ]
    }"#;

    #[derive(Default)]
    struct RecordingProgress {
        lines: Mutex<Vec<String>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn set_total(&self, _total: u64) {}
        fn inc(&self, _delta: u64) {}
        fn set_message(&self, _msg: String) {}
        fn status(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
        fn finish_and_clear(&self) {}
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn config_in(dir: &Path, surveys: Vec<PathBuf>, geometry: PathBuf) -> PipelineConfig {
        PipelineConfig {
            inputs: InputPaths {
                survey_files: surveys,
                geometry_file: geometry,
            },
            columns: SurveyColumns::default(),
            outputs: OutputPaths {
                directory: dir.join("out"),
                trend_chart: "lcsi_trend_chart.html".to_string(),
                map: "lcsi_map.html".to_string(),
            },
            geometry: GeometrySettings::default(),
            strategy_labels: StrategyLabelTable::lcsi(),
        }
    }

    #[test]
    fn writes_both_charts_from_two_waves() {
        let dir = tempfile::tempdir().unwrap();
        let surveys = vec![
            write(dir.path(), "wave_2021.csv", WAVE_2021),
            write(dir.path(), "wave_2023.csv", WAVE_2023),
        ];
        let geometry = write(dir.path(), "admin1.geojson", BOUNDARIES);
        let config = config_in(dir.path(), surveys, geometry);
        let progress = RecordingProgress::default();

        let summary = run(&config, &progress).unwrap();

        assert_eq!(summary.records_loaded, 6);
        assert_eq!(summary.dropped_rows, 1);
        assert_eq!(summary.observations, 5);
        assert_eq!(summary.name_key.property(), "ADM1_EN");
        assert_eq!(summary.region_match.matched, vec!["Bulawayo", "Harare"]);
        assert!(summary.region_match.unmatched.is_empty());
        // Harare and Bulawayo in both 2021 and 2023.
        assert_eq!(summary.spatial_rows, 4);

        let trend = std::fs::read_to_string(&summary.trend_chart).unwrap();
        assert!(trend.contains("LCSI Strategies Trend (2021-2023)"));
        let map = std::fs::read_to_string(&summary.map).unwrap();
        assert!(map.contains(r#""featureidkey":"properties.ADM1_EN""#));
        assert!(map.contains(r#""name":"2023""#));

        let lines = progress.lines.lock().unwrap();
        assert_eq!(lines.first().map(String::as_str), Some("Loading data..."));
        assert!(lines.contains(&"Using GeoJSON key: properties.ADM1_EN".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Done."));
    }

    #[test]
    fn empty_surveys_still_produce_valid_charts() {
        let dir = tempfile::tempdir().unwrap();
        let surveys = vec![write(
            dir.path(),
            "empty.csv",
            "adm1_name,survey_date,lcsi\nHarare,,3\n",
        )];
        let geometry = write(dir.path(), "admin1.geojson", BOUNDARIES);
        let config = config_in(dir.path(), surveys, geometry);

        let summary = run(&config, &NullProgress).unwrap();

        assert_eq!(summary.observations, 0);
        assert_eq!(summary.trend_rows, 0);
        assert_eq!(summary.spatial_rows, 0);
        let trend = std::fs::read_to_string(&summary.trend_chart).unwrap();
        assert!(trend.contains(r#""name":"Emergency""#));
        assert!(summary.map.exists());
    }

    #[test]
    fn configured_name_key_skips_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let surveys = vec![write(dir.path(), "wave.csv", WAVE_2023)];
        let geometry = write(dir.path(), "admin1.geojson", BOUNDARIES);
        let mut config = config_in(dir.path(), surveys, geometry);
        config.geometry.name_key = Some("shapeName".to_string());

        let summary = run(&config, &NullProgress).unwrap();

        assert_eq!(summary.name_key.resolution(), KeyResolution::Configured);
        assert!(summary.region_match.matched.is_empty());
        assert_eq!(summary.region_match.unmatched, vec!["Bulawayo", "Harare"]);
    }

    #[test]
    fn fallback_key_and_blank_map_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let surveys = vec![write(dir.path(), "wave.csv", WAVE_2021)];
        let geometry = write(
            dir.path(),
            "admin1.geojson",
            &BOUNDARIES.replace("ADM1_EN", "FOO"),
        );
        let config = config_in(dir.path(), surveys, geometry);
        let progress = RecordingProgress::default();

        let summary = run(&config, &progress).unwrap();

        assert!(summary.name_key.is_fallback());
        assert!(summary.region_match.matched.is_empty());

        let lines = progress.lines.lock().unwrap();
        assert!(
            lines.contains(
                &"Using GeoJSON key: properties.ADM1_EN (fallback; no candidate key found)"
                    .to_string()
            ),
            "got {lines:?}"
        );
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("Warning: no survey region matches")),
            "got {lines:?}"
        );
        assert!(
            lines.contains(
                &"Dropped 1 rows with missing or unparseable survey dates".to_string()
            ),
            "got {lines:?}"
        );
    }

    #[test]
    fn matched_key_has_no_fallback_notice() {
        let dir = tempfile::tempdir().unwrap();
        let surveys = vec![write(dir.path(), "wave.csv", WAVE_2023)];
        let geometry = write(dir.path(), "admin1.geojson", BOUNDARIES);
        let config = config_in(dir.path(), surveys, geometry);
        let progress = RecordingProgress::default();

        run(&config, &progress).unwrap();

        let lines = progress.lines.lock().unwrap();
        assert!(!lines.iter().any(|l| l.contains("fallback")), "got {lines:?}");
        assert!(!lines.iter().any(|l| l.starts_with("Warning:")), "got {lines:?}");
        assert!(!lines.iter().any(|l| l.starts_with("Dropped")), "got {lines:?}");
    }

    #[test]
    fn missing_geometry_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let surveys = vec![write(dir.path(), "wave.csv", WAVE_2021)];
        let config = config_in(dir.path(), surveys, dir.path().join("missing.geojson"));

        let err = run(&config, &NullProgress).unwrap_err();

        assert!(matches!(err, PipelineError::Geometry(_)), "got {err:?}");
        assert!(!config.outputs.directory.exists());
    }

    #[test]
    fn missing_survey_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let geometry = write(dir.path(), "admin1.geojson", BOUNDARIES);
        let config = config_in(dir.path(), vec![dir.path().join("absent.csv")], geometry);

        let err = run(&config, &NullProgress).unwrap_err();

        assert!(matches!(err, PipelineError::Load(_)), "got {err:?}");
    }
}
