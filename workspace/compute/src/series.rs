//! Forecast rows and the immutable, date-ordered series built from them.

use chrono::NaiveDate;
use common::{DayOfWeek, ForecastPoint};

use crate::error::{ForecastError, Result};

/// One forecast day with its confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub forecast_visits: f64,
    pub lower_ci: f64,
    pub upper_ci: f64,
}

impl ForecastRow {
    pub fn new(date: NaiveDate, forecast_visits: f64, lower_ci: f64, upper_ci: f64) -> Self {
        Self {
            date,
            forecast_visits,
            lower_ci,
            upper_ci,
        }
    }

    pub fn weekday(&self) -> DayOfWeek {
        DayOfWeek::of(self.date)
    }

    /// Whether `lower_ci <= forecast_visits <= upper_ci` and the forecast is non-negative.
    pub fn interval_holds(&self) -> bool {
        self.forecast_visits >= 0.0
            && self.lower_ci <= self.forecast_visits
            && self.forecast_visits <= self.upper_ci
    }
}

impl From<&ForecastRow> for ForecastPoint {
    fn from(row: &ForecastRow) -> Self {
        ForecastPoint {
            date: row.date,
            forecast_visits: row.forecast_visits,
            lower_ci: row.lower_ci,
            upper_ci: row.upper_ci,
        }
    }
}

/// Forecast rows in ascending date order with unique dates.
///
/// The series is built once and never mutated; callers share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    rows: Vec<ForecastRow>,
}

impl ForecastSeries {
    /// Sorts the rows by date. Empty input and duplicated dates are rejected.
    pub fn from_rows(mut rows: Vec<ForecastRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(ForecastError::EmptySeries);
        }
        rows.sort_by_key(|row| row.date);

        if let Some(pair) = rows.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(ForecastError::MalformedInput(format!(
                "duplicate forecast date {}",
                pair[0].date
            )));
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|row| row.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|row| row.date)
    }

    pub fn min_visits(&self) -> Option<f64> {
        self.rows.iter().map(|row| row.forecast_visits).reduce(f64::min)
    }

    pub fn max_visits(&self) -> Option<f64> {
        self.rows.iter().map(|row| row.forecast_visits).reduce(f64::max)
    }

    /// Arithmetic mean of `forecast_visits`, in full precision.
    pub fn mean_visits(&self) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let total: f64 = self.rows.iter().map(|row| row.forecast_visits).sum();
        Some(total / self.rows.len() as f64)
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastRow;
    type IntoIter = std::slice::Iter<'a, ForecastRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
