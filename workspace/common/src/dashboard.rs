use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::DayOfWeek;

/// Headline readouts for one capacity value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct KpiSummary {
    /// Mean forecast visits, truncated toward zero
    pub avg: i64,
    /// Peak forecast visits, truncated toward zero
    pub peak: i64,
    /// Capacity the breaches were computed against
    pub capacity: f64,
    /// Number of days forecast above capacity
    pub breach_count: usize,
}

/// A single forecast day, as drawn by the line and confidence band.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub forecast_visits: f64,
    pub lower_ci: f64,
    pub upper_ci: f64,
}

/// A point of the constant capacity overlay.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CapacityPoint {
    pub date: NaiveDate,
    pub capacity: f64,
}

/// Forecast line plus the capacity overlay, one overlay point per forecast day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastChart {
    pub points: Vec<ForecastPoint>,
    pub capacity_overlay: Vec<CapacityPoint>,
}

/// Average forecast for one weekday. `None` when the series has no such day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct WeekdayBar {
    pub weekday: DayOfWeek,
    pub average_visits: Option<f64>,
}

/// Breach table row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BreachRow {
    pub date: NaiveDate,
    pub forecast_visits: f64,
    pub upper_ci: f64,
}

/// Days forecast above capacity, ascending by date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BreachTable {
    pub rows: Vec<BreachRow>,
}

impl BreachTable {
    /// True when no day breaches; front ends render a success state instead of a table.
    pub fn is_clear(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Advisory range and starting value for the capacity input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CapacityBounds {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

/// Everything a dashboard page needs for one capacity value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Dashboard {
    pub kpis: KpiSummary,
    pub bounds: CapacityBounds,
    pub chart: ForecastChart,
    pub weekdays: Vec<WeekdayBar>,
    pub breaches: BreachTable,
}
