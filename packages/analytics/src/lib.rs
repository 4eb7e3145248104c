#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LCSI aggregation.
//!
//! Turns cleaned survey observations into the two data sets that get
//! rendered: the per-year category trend ([`trend`]) and the per-region
//! emergency prevalence ([`spatial`]). Both are pure functions over
//! in-memory observations, with deterministic (sorted) output.

pub mod spatial;
pub mod trend;

pub use spatial::{max_prevalence, spatial_rows};
pub use trend::{YearTally, tally_by_year, trend_rows};
