//! Shared fixtures for the compute tests.

use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::series::{ForecastRow, ForecastSeries};

/// Two days: a Monday under and a Tuesday over a capacity of 1000.
pub const SCENARIO_CSV: &str = "\
date,forecast_visits,lower_ci,upper_ci
2024-01-01,100,90,110
2024-01-02,1200,1100,1300
";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn scenario_series() -> ForecastSeries {
    ForecastSeries::from_rows(vec![
        ForecastRow::new(date(2024, 1, 1), 100.0, 90.0, 110.0),
        ForecastRow::new(date(2024, 1, 2), 1200.0, 1100.0, 1300.0),
    ])
    .unwrap()
}

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write CSV fixture");
    path
}
