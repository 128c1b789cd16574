use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::config::Settings;
use crate::error::{Result, WeatherError};
use crate::models::DailyRecord;
use crate::readers::DateColumnResolver;
use crate::utils::constants::{MAX_HUMIDITY_COLUMN, MAX_TEMP_COLUMN, MIN_TEMP_COLUMN};

/// Year, then one- or two-digit month and day.
fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("date pattern is valid")
    })
}

/// Turns the content of one station file into normalized daily records.
pub struct RecordParser {
    resolver: DateColumnResolver,
    max_temp_column: String,
    min_temp_column: String,
    max_humidity_column: String,
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            resolver: DateColumnResolver::new(),
            max_temp_column: MAX_TEMP_COLUMN.to_string(),
            min_temp_column: MIN_TEMP_COLUMN.to_string(),
            max_humidity_column: MAX_HUMIDITY_COLUMN.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            resolver: DateColumnResolver::with_aliases(settings.date_columns.clone()),
            max_temp_column: settings.max_temp_column.clone(),
            min_temp_column: settings.min_temp_column.clone(),
            max_humidity_column: settings.max_humidity_column.clone(),
        }
    }

    /// Read the header row and return a lazy iterator over the data rows.
    ///
    /// Fails with [`WeatherError::NoDateColumn`] when no known date column is
    /// present, and with a CSV error when the header itself cannot be read.
    /// Bad data rows never fail the file; they are dropped and counted.
    pub fn parse<'a>(&self, content: &'a str) -> Result<DailyRecords<'a>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let layout = self.layout(&headers)?;

        debug!(
            "Date column '{}' at index {}",
            headers[layout.date], layout.date
        );

        Ok(DailyRecords {
            rows: reader.into_records(),
            layout,
            dropped: 0,
        })
    }

    fn layout(&self, headers: &[String]) -> Result<ColumnLayout> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        Ok(ColumnLayout {
            date: self.resolver.resolve(headers)?,
            max_temp: find(&self.max_temp_column),
            min_temp: find(&self.min_temp_column),
            max_humidity: find(&self.max_humidity_column),
        })
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    date: usize,
    max_temp: Option<usize>,
    min_temp: Option<usize>,
    max_humidity: Option<usize>,
}

impl ColumnLayout {
    fn normalize(&self, row: &StringRecord) -> Result<DailyRecord> {
        let raw_date = row.get(self.date).unwrap_or("");
        let date = parse_date(raw_date)?;

        let cell = |index: Option<usize>| index.and_then(|i| row.get(i)).and_then(parse_measurement);

        Ok(DailyRecord::new(
            date,
            cell(self.max_temp),
            cell(self.min_temp),
            cell(self.max_humidity),
        ))
    }
}

/// Parse a `YYYY-M-D` date, rejecting anything else and impossible days.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    let captures = date_pattern()
        .captures(raw)
        .ok_or_else(|| WeatherError::MalformedRow(format!("Invalid date format: '{}'", raw)))?;

    let field = |i: usize| captures[i].parse::<u32>().ok();
    let year = captures[1].parse::<i32>().ok();

    match (year, field(2), field(3)) {
        (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| WeatherError::MalformedRow(format!("Invalid calendar date: '{}'", raw))),
        _ => Err(WeatherError::MalformedRow(format!("Invalid date: '{}'", raw))),
    }
}

/// Empty, non-numeric and non-finite cells are absent.
fn parse_measurement(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Daily records of one file, produced row by row.
pub struct DailyRecords<'a> {
    rows: StringRecordsIntoIter<&'a [u8]>,
    layout: ColumnLayout,
    dropped: usize,
}

impl DailyRecords<'_> {
    /// Rows skipped so far because their date or encoding was unusable.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Iterator for DailyRecords<'_> {
    type Item = DailyRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.rows.next()? {
                Ok(row) => match self.layout.normalize(&row) {
                    Ok(record) => return Some(record),
                    Err(e) => {
                        self.dropped += 1;
                        debug!("Skipping row {:?}: {}", row.position().map(|p| p.line()), e);
                    }
                },
                Err(e) => {
                    self.dropped += 1;
                    debug!("Skipping unreadable row: {}", e);
                }
            }
        }
    }
}
