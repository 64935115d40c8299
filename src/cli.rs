use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

use commands::{report, serve};

use crate::config::ForecastConfig;

#[derive(Parser)]
#[command(name = "trafficcap")]
#[command(about = "Web traffic forecast dashboard: capacity breaches and weekday seasonality")]
#[command(version)]
pub struct Cli {
    /// Path to the forecast CSV
    ///
    /// Needs the columns date, forecast_visits, lower_ci and upper_ci.
    /// Defaults to sarima_forecast_output.csv next to this executable.
    #[arg(short, long, env = "FORECAST_PATH", global = true)]
    pub forecast_path: Option<PathBuf>,

    /// Reject forecasts outside their confidence interval instead of warning
    #[arg(long, env = "FORECAST_STRICT_INTERVALS", global = true)]
    pub strict_intervals: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
    /// Print KPIs, weekday averages and breach days for a capacity
    Report {
        /// Capacity in visits per day; defaults to the mean forecast
        #[arg(short, long)]
        capacity: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = ForecastConfig::new(self.forecast_path, self.strict_intervals)?;
        match self.command {
            Commands::Serve { bind_address } => {
                serve(&config, &bind_address).await?;
            }
            Commands::Report { capacity, format } => {
                report(&config, capacity, format)?;
            }
        }
        Ok(())
    }
}
