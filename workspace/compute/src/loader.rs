//! Reads the forecast artifact into a [`ForecastSeries`].
//!
//! The artifact is a delimited table with at least the columns `date`,
//! `forecast_visits`, `lower_ci` and `upper_ci`. Any other column is ignored.

pub mod cache;

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{ForecastError, Result};
use crate::series::{ForecastRow, ForecastSeries};

/// File name the forecast job writes next to the dashboard binary.
pub const DEFAULT_FORECAST_FILE: &str = "sarima_forecast_output.csv";

pub const DATE_COLUMN: &str = "date";
pub const FORECAST_COLUMN: &str = "forecast_visits";
pub const LOWER_CI_COLUMN: &str = "lower_ci";
pub const UPPER_CI_COLUMN: &str = "upper_ci";

pub const REQUIRED_COLUMNS: [&str; 4] = [DATE_COLUMN, FORECAST_COLUMN, LOWER_CI_COLUMN, UPPER_CI_COLUMN];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Options applied while turning the table into rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LoadOptions {
    /// Fail on the first row breaking `lower_ci <= forecast_visits <= upper_ci`
    /// (or with a negative forecast) instead of logging a warning.
    pub strict_intervals: bool,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            strict_intervals: true,
        }
    }
}

/// Anything that can produce a forecast series for a path.
pub trait ForecastLoader {
    fn load(&self, path: &Path) -> Result<Arc<ForecastSeries>>;
}

/// Reads CSV artifacts with polars. Every call goes to disk; wrap it in
/// [`cache::ForecastCacheLoader`] to memoize.
#[derive(Debug, Clone, Default)]
pub struct CsvForecastLoader {
    options: LoadOptions,
}

impl CsvForecastLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> LoadOptions {
        self.options
    }
}

impl ForecastLoader for CsvForecastLoader {
    #[instrument(skip(self), fields(path = %path.display(), strict = self.options.strict_intervals))]
    fn load(&self, path: &Path) -> Result<Arc<ForecastSeries>> {
        let df = read_forecast_csv(path)?;
        let series = dataframe_to_series(&df, self.options)?;

        info!(
            rows = series.len(),
            first = ?series.first_date(),
            last = ?series.last_date(),
            "Loaded forecast artifact"
        );
        Ok(Arc::new(series))
    }
}

/// Parse the CSV file into a polars DataFrame without interpreting it.
///
/// Column types are inferred over the whole file, so integer-looking rows at
/// the top do not pin a numeric column to `i64`.
pub fn read_forecast_csv(path: &Path) -> Result<DataFrame> {
    debug!("Reading forecast CSV");
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.into()))?
        .finish()?;
    debug!(height = df.height(), width = df.width(), "CSV parsed");
    Ok(df)
}

/// Validate the table shape and convert it to a [`ForecastSeries`].
pub fn dataframe_to_series(df: &DataFrame, options: LoadOptions) -> Result<ForecastSeries> {
    check_required_columns(df)?;

    if df.height() == 0 {
        return Err(ForecastError::EmptySeries);
    }

    let dates = date_column(df)?;
    let forecasts = float_column(df, FORECAST_COLUMN)?;
    let lowers = float_column(df, LOWER_CI_COLUMN)?;
    let uppers = float_column(df, UPPER_CI_COLUMN)?;

    let mut rows = Vec::with_capacity(df.height());
    for (((date, forecast), lower), upper) in dates.into_iter().zip(forecasts).zip(lowers).zip(uppers) {
        let row = ForecastRow::new(date, forecast, lower, upper);
        if !row.interval_holds() {
            if options.strict_intervals {
                return Err(ForecastError::MalformedInput(format!(
                    "row {} violates lower_ci <= forecast_visits <= upper_ci ({} <= {} <= {})",
                    date, lower, forecast, upper
                )));
            }
            warn!(%date, lower, forecast, upper, "Forecast outside its confidence interval");
        }
        rows.push(row);
    }

    ForecastSeries::from_rows(rows)
}

fn check_required_columns(df: &DataFrame) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !present.iter().any(|name| name.trim() == *required))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ForecastError::MalformedInput(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

fn required_series(df: &DataFrame, name: &str) -> Result<Series> {
    let column = df
        .get_columns()
        .iter()
        .find(|column| column.name().trim() == name)
        .ok_or_else(|| ForecastError::MalformedInput(format!("missing required column: {}", name)))?;
    Ok(column.as_materialized_series().clone())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = required_series(df, name)?.cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(ForecastError::MalformedInput(format!(
                "missing or non-numeric {} at data row {}",
                name,
                index + 1
            ))),
        })
        .collect()
}

fn date_column(df: &DataFrame) -> Result<Vec<NaiveDate>> {
    let series = required_series(df, DATE_COLUMN)?.cast(&DataType::String)?;
    series
        .str()?
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let raw = value.ok_or_else(|| {
                ForecastError::MalformedInput(format!("missing date at data row {}", index + 1))
            })?;
            parse_date(raw).ok_or_else(|| {
                ForecastError::MalformedInput(format!(
                    "unparsable date '{}' at data row {}",
                    raw,
                    index + 1
                ))
            })
        })
        .collect()
}

/// Parse a calendar date. Datetime strings are accepted and their time part dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{SCENARIO_CSV, write_csv};
    use tempfile::TempDir;

    fn load_str(contents: &str, options: LoadOptions) -> Result<Arc<ForecastSeries>> {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "forecast.csv", contents);
        CsvForecastLoader::new(options).load(&path)
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2);
        assert_eq!(parse_date("2024-01-02"), expected);
        assert_eq!(parse_date("2024/01/02"), expected);
        assert_eq!(parse_date(" 2024-01-02 "), expected);
        assert_eq!(parse_date("2024-01-02 00:00:00"), expected);
        assert_eq!(parse_date("2024-01-02T13:45:00"), expected);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn test_load_scenario() {
        let series = load_str(SCENARIO_CSV, LoadOptions::default()).unwrap();
        assert_eq!(series.len(), 2);

        let first = &series.rows()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.forecast_visits, 100.0);
        assert_eq!(first.lower_ci, 90.0);
        assert_eq!(first.upper_ci, 110.0);
    }

    #[test]
    fn test_load_ignores_extra_columns_and_sorts() {
        let csv = "\
date,forecast_visits,lower_ci,upper_ci,model
2024-01-03,300,250,350,sarima
2024-01-01,100,90,110,sarima
2024-01-02,200.5,150,250,sarima
";
        let series = load_str(csv, LoadOptions::default()).unwrap();
        let visits: Vec<f64> = series.iter().map(|row| row.forecast_visits).collect();
        assert_eq!(visits, vec![100.0, 200.5, 300.0]);
    }

    #[test]
    fn test_missing_forecast_column_is_malformed() {
        let csv = "date,lower_ci,upper_ci\n2024-01-01,90,110\n";
        let err = load_str(csv, LoadOptions::default()).unwrap_err();
        match err {
            ForecastError::MalformedInput(message) => assert!(message.contains("forecast_visits")),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_is_empty_series() {
        let csv = "date,forecast_visits,lower_ci,upper_ci\n";
        let err = load_str(csv, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ForecastError::EmptySeries));
    }

    #[test]
    fn test_decimal_after_many_integer_rows() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut csv = String::from("date,forecast_visits,lower_ci,upper_ci\n");
        for day in 0..150 {
            let date = start + chrono::Days::new(day);
            if day < 120 {
                csv.push_str(&format!("{},100,90,110\n", date));
            } else {
                csv.push_str(&format!("{},100.5,90.25,110.75\n", date));
            }
        }

        let series = load_str(&csv, LoadOptions::default()).unwrap();
        assert_eq!(series.len(), 150);
        assert_eq!(series.rows()[0].forecast_visits, 100.0);
        let last = &series.rows()[149];
        assert_eq!(last.forecast_visits, 100.5);
        assert_eq!(last.lower_ci, 90.25);
        assert_eq!(last.upper_ci, 110.75);
    }

    #[test]
    fn test_unparsable_date_is_malformed() {
        let csv = "date,forecast_visits,lower_ci,upper_ci\nsomeday,100,90,110\n";
        let err = load_str(csv, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedInput(_)));
    }

    #[test]
    fn test_non_numeric_value_is_malformed() {
        let csv = "date,forecast_visits,lower_ci,upper_ci\n2024-01-01,lots,90,110\n";
        let err = load_str(csv, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedInput(_)));
    }

    #[test]
    fn test_missing_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        let err = CsvForecastLoader::default()
            .load(&dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, ForecastError::MalformedInput(_)));
    }

    #[test]
    fn test_interval_violation_is_lenient_by_default() {
        let csv = "date,forecast_visits,lower_ci,upper_ci\n2024-01-01,500,90,110\n";
        let series = load_str(csv, LoadOptions::default()).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_interval_violation_fails_in_strict_mode() {
        let csv = "date,forecast_visits,lower_ci,upper_ci\n2024-01-01,500,90,110\n";
        let err = load_str(csv, LoadOptions::strict()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedInput(_)));
    }
}
