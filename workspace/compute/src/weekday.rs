use common::DayOfWeek;
use tracing::{debug, instrument};

use crate::series::{ForecastRow, ForecastSeries};

/// Mean forecast per weekday, Monday through Sunday.
///
/// Always holds all seven weekdays. A weekday absent from the series is `None`,
/// which is distinct from an observed average of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekdayAverages {
    averages: [Option<f64>; 7],
}

impl WeekdayAverages {
    pub fn get(&self, day: DayOfWeek) -> Option<f64> {
        self.averages[day.index()]
    }

    /// Weekdays with their averages in Monday..Sunday order.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, Option<f64>)> + '_ {
        DayOfWeek::ALL.iter().map(|day| (*day, self.get(*day)))
    }

    /// Number of weekdays with at least one observation.
    pub fn observed_days(&self) -> usize {
        self.averages.iter().filter(|average| average.is_some()).count()
    }
}

/// Groups the series by weekday and averages `forecast_visits` per group.
pub fn aggregate(series: &ForecastSeries) -> WeekdayAverages {
    aggregate_rows(series.rows())
}

/// Same as [`aggregate`] over rows in any order.
///
/// Each group is summed in sorted order, so any permutation of `rows` gives a
/// bit-identical result.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn aggregate_rows(rows: &[ForecastRow]) -> WeekdayAverages {
    let mut groups: [Vec<f64>; 7] = Default::default();
    for row in rows {
        groups[row.weekday().index()].push(row.forecast_visits);
    }

    let averages = groups.map(|mut values| {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        let total: f64 = values.iter().sum();
        Some(total / values.len() as f64)
    });

    let result = WeekdayAverages { averages };
    debug!(observed = result.observed_days(), "Weekday averages computed");
    result
}
