use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WeatherError};

/// One normalized day of station data.
///
/// Numeric fields are `None` when the source cell was empty or not a finite
/// number. How `None` takes part in aggregation is decided by
/// [`MissingValuePolicy`], never by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub max_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    pub max_humidity: Option<f64>,
}

impl DailyRecord {
    pub fn new(
        date: NaiveDate,
        max_temp_c: Option<f64>,
        min_temp_c: Option<f64>,
        max_humidity: Option<f64>,
    ) -> Self {
        Self {
            date,
            max_temp_c,
            min_temp_c,
            max_humidity,
        }
    }

    pub fn is_in(&self, period: &Period) -> bool {
        self.date.year() == period.year && period.month.map_or(true, |m| self.date.month() == m)
    }
}

/// How absent numeric fields are seen by extremes, averages and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Absent values count as 0.0. A zero can therefore win a min/max
    /// comparison or pull an average down.
    #[default]
    TreatAsZero,
    /// Absent values are left out entirely.
    Skip,
}

impl MissingValuePolicy {
    pub fn resolve(&self, value: Option<f64>) -> Option<f64> {
        match self {
            MissingValuePolicy::TreatAsZero => Some(value.unwrap_or(0.0)),
            MissingValuePolicy::Skip => value,
        }
    }
}

/// The year, and optionally the month, a report is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

impl Period {
    pub fn new(year: i32, month: Option<u32>) -> Result<Self> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(WeatherError::InvalidMonth(m));
            }
        }
        Ok(Self { year, month })
    }

    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{}-{:02}", self.year, month),
            None => write!(f, "{}", self.year),
        }
    }
}
