use anyhow::Result;
use common::Dashboard;
use std::fmt;
use tracing::{debug, info};

use crate::cli::ReportFormat;
use crate::config::{ForecastConfig, load_series};
use crate::helpers::converters::build_dashboard;

pub fn report(config: &ForecastConfig, capacity: Option<f64>, format: ReportFormat) -> Result<()> {
    let series = load_series(config)?;
    let weekdays = compute::aggregate(&series);
    let bounds = compute::capacity_bounds(&series)?;

    let capacity = capacity.unwrap_or(bounds.default as f64);
    debug!(capacity, ?format, "Building report");
    let dashboard = build_dashboard(&series, &weekdays, bounds, capacity)?;
    info!(breach_count = dashboard.kpis.breach_count, "Report ready");

    match format {
        ReportFormat::Text => println!("{}", TextReport(&dashboard)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
    }
    Ok(())
}

/// Plain-text rendering of a dashboard for the terminal.
pub struct TextReport<'a>(pub &'a Dashboard);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dashboard = self.0;
        let kpis = &dashboard.kpis;

        writeln!(f, "Avg Forecast Traffic    {}", kpis.avg)?;
        writeln!(f, "Peak Forecast Traffic   {}", kpis.peak)?;
        writeln!(f, "Server Capacity         {}", kpis.capacity)?;
        writeln!(f, "Risk Days               {}", kpis.breach_count)?;
        writeln!(
            f,
            "Capacity range          {} to {} (default {})",
            dashboard.bounds.min, dashboard.bounds.max, dashboard.bounds.default
        )?;

        writeln!(f)?;
        writeln!(f, "Average Forecast Traffic by Weekday")?;
        for bar in &dashboard.weekdays {
            match bar.average_visits {
                Some(average) => writeln!(f, "  {:<10} {:>10.2}", bar.weekday.label(), average)?,
                None => writeln!(f, "  {:<10} {:>10}", bar.weekday.label(), "no data")?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Capacity Breach Days")?;
        if dashboard.breaches.is_clear() {
            write!(f, "  No capacity breach predicted in the forecast horizon.")?;
            return Ok(());
        }

        writeln!(f, "  {} days exceed server capacity.", dashboard.breaches.len())?;
        write!(f, "  {:<10}  {:>15}  {:>10}", "date", "forecast_visits", "upper_ci")?;
        for row in &dashboard.breaches.rows {
            write!(
                f,
                "\n  {:<10}  {:>15.2}  {:>10.2}",
                row.date.to_string(),
                row.forecast_visits,
                row.upper_ci
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::scenario_series;

    fn scenario_dashboard(capacity: f64) -> Dashboard {
        let series = scenario_series();
        let weekdays = compute::aggregate(&series);
        let bounds = compute::capacity_bounds(&series).unwrap();
        build_dashboard(&series, &weekdays, bounds, capacity).unwrap()
    }

    #[test]
    fn test_text_report_lists_breaches() {
        let text = TextReport(&scenario_dashboard(1000.0)).to_string();

        assert!(text.contains("Avg Forecast Traffic    650"));
        assert!(text.contains("Peak Forecast Traffic   1200"));
        assert!(text.contains("Risk Days               1"));
        assert!(text.contains("1 days exceed server capacity."));
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("Wednesday     no data"));
    }

    #[test]
    fn test_text_report_clear_state() {
        let text = TextReport(&scenario_dashboard(5000.0)).to_string();
        assert!(text.contains("No capacity breach predicted"));
        assert!(!text.contains("upper_ci"));
    }
}
