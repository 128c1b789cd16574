use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};
use crate::models::Period;

/// The best value seen so far for one metric and the day it occurred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremeResult {
    pub value: f64,
    pub occurred_on: NaiveDate,
}

impl ExtremeResult {
    pub fn new(value: f64, occurred_on: NaiveDate) -> Self {
        Self { value, occurred_on }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeSummary {
    pub period: Period,
    pub highest_temp: Option<ExtremeResult>,
    pub lowest_temp: Option<ExtremeResult>,
    pub most_humid: Option<ExtremeResult>,
}

impl ExtremeSummary {
    pub fn highest_temp(&self) -> Result<&ExtremeResult> {
        self.highest_temp.as_ref().ok_or_else(|| self.no_data())
    }

    pub fn lowest_temp(&self) -> Result<&ExtremeResult> {
        self.lowest_temp.as_ref().ok_or_else(|| self.no_data())
    }

    pub fn most_humid(&self) -> Result<&ExtremeResult> {
        self.most_humid.as_ref().ok_or_else(|| self.no_data())
    }

    fn no_data(&self) -> WeatherError {
        WeatherError::NoDataForQuery {
            period: self.period,
        }
    }
}

/// Sum and count of one metric within a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMean {
    pub sum: f64,
    pub count: usize,
}

impl RunningMean {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// How per-file means are combined into one average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AveragingStrategy {
    /// Mean of per-file means; every station weighs the same.
    #[default]
    EqualWeightPerFile,
    /// Total sum over total count across all files.
    RowWeighted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAverages {
    pub period: Period,
    pub highest_temp: Option<f64>,
    pub lowest_temp: Option<f64>,
    pub humidity: Option<f64>,
}

impl MonthlyAverages {
    pub fn highest_temp(&self) -> Result<f64> {
        self.highest_temp.ok_or_else(|| self.no_data())
    }

    pub fn lowest_temp(&self) -> Result<f64> {
        self.lowest_temp.ok_or_else(|| self.no_data())
    }

    pub fn humidity(&self) -> Result<f64> {
        self.humidity.ok_or_else(|| self.no_data())
    }

    fn no_data(&self) -> WeatherError {
        WeatherError::NoDataForQuery {
            period: self.period,
        }
    }
}
