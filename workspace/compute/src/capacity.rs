//! Capacity breach analysis over a forecast series.
//!
//! Aggregates are kept in full precision. Display values (`avg`, `peak`, the
//! advisory bounds) truncate toward zero, so 649.9 shows as 649 and -0.5 as 0.

use common::CapacityBounds;
use tracing::{debug, instrument};

use crate::error::{ForecastError, Result};
use crate::series::{ForecastRow, ForecastSeries};

/// Added to the peak forecast to get the upper bound of the capacity input.
pub const CAPACITY_HEADROOM: i64 = 500;

/// KPI aggregates and breach days for one capacity value.
///
/// `breach_rows` borrows from the analysed series and is recomputed on every call
/// to [`analyze`]; it is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityAnalysis<'a> {
    pub mean_visits: f64,
    pub peak_visits: f64,
    pub capacity: f64,
    pub breach_rows: Vec<&'a ForecastRow>,
}

impl CapacityAnalysis<'_> {
    /// Mean forecast for display.
    pub fn avg(&self) -> i64 {
        truncate_for_display(self.mean_visits)
    }

    /// Peak forecast for display.
    pub fn peak(&self) -> i64 {
        truncate_for_display(self.peak_visits)
    }

    pub fn breach_count(&self) -> usize {
        self.breach_rows.len()
    }

    /// True when no day exceeds capacity.
    pub fn is_clear(&self) -> bool {
        self.breach_rows.is_empty()
    }
}

/// Truncate toward zero. Out-of-range values saturate at the `i64` limits.
pub fn truncate_for_display(value: f64) -> i64 {
    value.trunc() as i64
}

/// Rejects negative, NaN and infinite capacities. `-0.0` comes back as `0.0`.
pub fn check_capacity(capacity: f64) -> Result<f64> {
    if capacity.is_finite() && capacity >= 0.0 {
        Ok(capacity + 0.0)
    } else {
        Err(ForecastError::InvalidCapacity(capacity))
    }
}

/// Computes the KPI aggregates and the breach set of `series` against `capacity`.
///
/// A day breaches only when its forecast is strictly above capacity. Any finite,
/// non-negative capacity is accepted, including values outside [`capacity_bounds`].
#[instrument(skip(series), fields(rows = series.len()))]
pub fn analyze(series: &ForecastSeries, capacity: f64) -> Result<CapacityAnalysis<'_>> {
    if series.is_empty() {
        return Err(ForecastError::EmptySeries);
    }
    let capacity = check_capacity(capacity)?;

    let mean_visits = series.mean_visits().ok_or(ForecastError::EmptySeries)?;
    let peak_visits = series.max_visits().ok_or(ForecastError::EmptySeries)?;

    let breach_rows: Vec<&ForecastRow> = series
        .iter()
        .filter(|row| row.forecast_visits > capacity)
        .collect();

    debug!(
        mean_visits,
        peak_visits,
        breaches = breach_rows.len(),
        "Capacity analysis complete"
    );

    Ok(CapacityAnalysis {
        mean_visits,
        peak_visits,
        capacity,
        breach_rows,
    })
}

/// Advisory range and default for the capacity input.
///
/// `min` is the lowest forecast, `max` the peak plus [`CAPACITY_HEADROOM`] and
/// `default` the mean, each truncated for display.
pub fn capacity_bounds(series: &ForecastSeries) -> Result<CapacityBounds> {
    let min = series.min_visits().ok_or(ForecastError::EmptySeries)?;
    let max = series.max_visits().ok_or(ForecastError::EmptySeries)?;
    let mean = series.mean_visits().ok_or(ForecastError::EmptySeries)?;

    Ok(CapacityBounds {
        min: truncate_for_display(min),
        max: truncate_for_display(max).saturating_add(CAPACITY_HEADROOM),
        default: truncate_for_display(mean),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, scenario_series};

    #[test]
    fn test_scenario_kpis() {
        let series = scenario_series();
        let analysis = analyze(&series, 1000.0).unwrap();

        assert_eq!(analysis.avg(), 650);
        assert_eq!(analysis.peak(), 1200);
        assert_eq!(analysis.capacity, 1000.0);
        assert_eq!(analysis.breach_count(), 1);

        let breach = analysis.breach_rows[0];
        assert_eq!(breach.date, date(2024, 1, 2));
        assert_eq!(breach.forecast_visits, 1200.0);
        assert_eq!(breach.upper_ci, 1300.0);
    }

    #[test]
    fn test_equal_to_capacity_is_not_a_breach() {
        let series = ForecastSeries::from_rows(vec![
            ForecastRow::new(date(2024, 1, 1), 1000.0, 900.0, 1100.0),
            ForecastRow::new(date(2024, 1, 2), 1001.0, 900.0, 1100.0),
        ])
        .unwrap();

        let analysis = analyze(&series, 1000.0).unwrap();
        assert_eq!(analysis.breach_count(), 1);
        assert_eq!(analysis.breach_rows[0].date, date(2024, 1, 2));
    }

    #[test]
    fn test_breaches_keep_date_order() {
        let series = ForecastSeries::from_rows(vec![
            ForecastRow::new(date(2024, 1, 5), 500.0, 400.0, 600.0),
            ForecastRow::new(date(2024, 1, 1), 700.0, 600.0, 800.0),
            ForecastRow::new(date(2024, 1, 3), 10.0, 5.0, 15.0),
            ForecastRow::new(date(2024, 1, 2), 600.0, 500.0, 700.0),
        ])
        .unwrap();

        let analysis = analyze(&series, 100.0).unwrap();
        let dates: Vec<_> = analysis.breach_rows.iter().map(|row| row.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 5)]);
    }

    #[test]
    fn test_display_values_truncate_toward_zero() {
        let series = ForecastSeries::from_rows(vec![
            ForecastRow::new(date(2024, 1, 1), 100.0, 90.0, 110.0),
            ForecastRow::new(date(2024, 1, 2), 200.9, 190.0, 210.0),
        ])
        .unwrap();

        let analysis = analyze(&series, 0.0).unwrap();
        assert!((analysis.mean_visits - 150.45).abs() < 1e-9);
        assert_eq!(analysis.avg(), 150);
        assert_eq!(analysis.peak(), 200);
        assert_eq!(truncate_for_display(-0.5), 0);
        assert_eq!(truncate_for_display(-1.7), -1);
    }

    #[test]
    fn test_capacity_outside_bounds_is_accepted() {
        let series = scenario_series();

        let everything = analyze(&series, 0.0).unwrap();
        assert_eq!(everything.breach_count(), 2);

        let nothing = analyze(&series, 1_000_000.0).unwrap();
        assert_eq!(nothing.breach_count(), 0);
        assert!(nothing.is_clear());
    }

    #[test]
    fn test_negative_zero_capacity_is_zero() {
        let capacity = check_capacity(-0.0).unwrap();
        assert_eq!(capacity.to_bits(), 0.0f64.to_bits());

        let series = scenario_series();
        let analysis = analyze(&series, -0.0).unwrap();
        assert!(analysis.capacity.is_sign_positive());
    }

    #[test]
    fn test_invalid_capacity() {
        let series = scenario_series();
        assert!(matches!(analyze(&series, -1.0), Err(ForecastError::InvalidCapacity(_))));
        assert!(matches!(analyze(&series, f64::NAN), Err(ForecastError::InvalidCapacity(_))));
        assert!(matches!(
            analyze(&series, f64::INFINITY),
            Err(ForecastError::InvalidCapacity(_))
        ));
    }

    #[test]
    fn test_empty_series() {
        assert!(matches!(ForecastSeries::from_rows(Vec::new()), Err(ForecastError::EmptySeries)));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let series = scenario_series();
        assert_eq!(analyze(&series, 1000.0).unwrap(), analyze(&series, 1000.0).unwrap());
    }

    #[test]
    fn test_capacity_bounds() {
        let bounds = capacity_bounds(&scenario_series()).unwrap();
        assert_eq!(
            bounds,
            CapacityBounds {
                min: 100,
                max: 1700,
                default: 650,
            }
        );
    }
}
