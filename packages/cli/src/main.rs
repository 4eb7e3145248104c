#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Runs the LCSI pipeline with the embedded Zimbabwe configuration.
//!
//! Uses `indicatif-log-bridge` (via [`lcsi_cli_utils::init_logger`]) so log
//! lines and the stage progress bar never fight for the terminal.

use lcsi_cli_utils::IndicatifProgress;
use lcsi_config::PipelineConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = lcsi_cli_utils::init_logger();

    let config = PipelineConfig::zimbabwe()?;
    let progress =
        IndicatifProgress::steps_bar(&multi, "LCSI pipeline", lcsi_cli::pipeline::STAGES);

    let summary = lcsi_cli::run(&config, progress.as_ref())?;
    log::info!(
        "Wrote {} and {} from {} observations",
        summary.trend_chart.display(),
        summary.map.display(),
        summary.observations
    );

    Ok(())
}
