//! Conversions from compute results to the transport types in `common`.

use common::{
    BreachRow, BreachTable, CapacityBounds, CapacityPoint, Dashboard, ForecastChart,
    ForecastPoint, KpiSummary, WeekdayBar,
};
use compute::{CapacityAnalysis, ForecastSeries, WeekdayAverages};

pub fn kpi_summary(analysis: &CapacityAnalysis<'_>) -> KpiSummary {
    KpiSummary {
        avg: analysis.avg(),
        peak: analysis.peak(),
        capacity: analysis.capacity,
        breach_count: analysis.breach_count(),
    }
}

/// Breach rows projected to the columns the table shows.
pub fn breach_table(analysis: &CapacityAnalysis<'_>) -> BreachTable {
    BreachTable {
        rows: analysis
            .breach_rows
            .iter()
            .map(|row| BreachRow {
                date: row.date,
                forecast_visits: row.forecast_visits,
                upper_ci: row.upper_ci,
            })
            .collect(),
    }
}

/// Forecast points plus a flat capacity overlay of the same length.
pub fn forecast_chart(series: &ForecastSeries, capacity: f64) -> ForecastChart {
    ForecastChart {
        points: series.iter().map(ForecastPoint::from).collect(),
        capacity_overlay: series
            .iter()
            .map(|row| CapacityPoint {
                date: row.date,
                capacity,
            })
            .collect(),
    }
}

pub fn weekday_bars(averages: &WeekdayAverages) -> Vec<WeekdayBar> {
    averages
        .iter()
        .map(|(weekday, average_visits)| WeekdayBar {
            weekday,
            average_visits,
        })
        .collect()
}

/// Everything a dashboard page shows for `capacity`.
pub fn build_dashboard(
    series: &ForecastSeries,
    weekdays: &WeekdayAverages,
    bounds: CapacityBounds,
    capacity: f64,
) -> compute::Result<Dashboard> {
    let analysis = compute::analyze(series, capacity)?;

    Ok(Dashboard {
        kpis: kpi_summary(&analysis),
        bounds,
        chart: forecast_chart(series, capacity),
        weekdays: weekday_bars(weekdays),
        breaches: breach_table(&analysis),
    })
}
