use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{Result, WeatherError};
use crate::models::{
    AveragingStrategy, DailyRecord, ExtremeSummary, MissingValuePolicy, MonthlyAverages, Period,
};
use crate::processors::{AverageAggregator, ExtremeAggregator, YearMonthFilter};
use crate::readers::{RecordParser, StationFileReader};
use crate::utils::progress::ProgressReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Highest, lowest and most humid day of the period.
    Extremes,
    /// Monthly averages across stations.
    Averages,
    /// Daily high/low bar chart for one month.
    Chart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub period: Period,
    pub mode: ReportMode,
}

impl ReportQuery {
    pub fn extremes(year: i32, month: Option<u32>) -> Result<Self> {
        Ok(Self {
            period: Period::new(year, month)?,
            mode: ReportMode::Extremes,
        })
    }

    pub fn averages(year: i32, month: u32) -> Result<Self> {
        Ok(Self {
            period: Period::new(year, Some(month))?,
            mode: ReportMode::Averages,
        })
    }

    pub fn chart(year: i32, month: u32) -> Result<Self> {
        Ok(Self {
            period: Period::new(year, Some(month))?,
            mode: ReportMode::Chart,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Extremes(ExtremeSummary),
    Averages(MonthlyAverages),
    /// Records of every station for the month, ordered by date.
    Chart(Vec<DailyRecord>),
}

#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub files_found: usize,
    pub files_used: usize,
    pub skipped_files: Vec<SkippedFile>,
    pub rows_dropped: usize,
    pub rows_matched: usize,
}

impl ProcessingStats {
    pub fn summary(&self) -> String {
        format!(
            "Files: {} found, {} used, {} skipped; rows: {} matched, {} dropped",
            self.files_found,
            self.files_used,
            self.skipped_files.len(),
            self.rows_matched,
            self.rows_dropped
        )
    }
}

/// Where the filtered records of each file end up.
enum ReportSink {
    Extremes(ExtremeAggregator),
    Averages(AverageAggregator),
    Chart(Vec<DailyRecord>),
}

impl ReportSink {
    fn new(query: &ReportQuery, policy: MissingValuePolicy, strategy: AveragingStrategy) -> Self {
        match query.mode {
            ReportMode::Extremes => {
                ReportSink::Extremes(ExtremeAggregator::new(query.period, policy))
            }
            ReportMode::Averages => {
                ReportSink::Averages(AverageAggregator::new(query.period, policy, strategy))
            }
            ReportMode::Chart => ReportSink::Chart(Vec::new()),
        }
    }

    fn add_file<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = DailyRecord>,
    {
        match self {
            ReportSink::Extremes(aggregator) => aggregator.add_file(records),
            ReportSink::Averages(aggregator) => aggregator.add_file(records),
            ReportSink::Chart(buffer) => {
                let before = buffer.len();
                buffer.extend(records);
                buffer.len() - before
            }
        }
    }

    fn finish(self) -> Report {
        match self {
            ReportSink::Extremes(aggregator) => Report::Extremes(aggregator.finish()),
            ReportSink::Averages(aggregator) => Report::Averages(aggregator.finish()),
            ReportSink::Chart(mut records) => {
                // Stable, so days present in several files keep file order
                records.sort_by_key(|r| r.date);
                Report::Chart(records)
            }
        }
    }
}

/// Runs one report over every station file of a directory.
pub struct ReportProcessor {
    files: StationFileReader,
    parser: RecordParser,
    policy: MissingValuePolicy,
    strategy: AveragingStrategy,
}

impl ReportProcessor {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            files: StationFileReader::with_extension(&settings.file_extension),
            parser: RecordParser::from_settings(settings),
            policy: settings.missing_values,
            strategy: settings.averaging,
        }
    }

    /// Process the files of `dir` one after another.
    ///
    /// Only an unusable directory is an error. Files that cannot be read or
    /// parsed are logged, listed in the returned stats and left out of the
    /// report.
    pub fn process_directory(
        &self,
        dir: &Path,
        query: &ReportQuery,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Report, ProcessingStats)> {
        let paths = self.files.discover(dir)?;
        info!(
            "Processing {} station files from {} for {}",
            paths.len(),
            dir.display(),
            query.period
        );

        let filter = YearMonthFilter::new(query.period);
        let mut sink = ReportSink::new(query, self.policy, self.strategy);
        let mut stats = ProcessingStats {
            files_found: paths.len(),
            ..Default::default()
        };

        if let Some(progress) = progress {
            progress.set_length(paths.len() as u64);
        }

        for path in &paths {
            if let Some(progress) = progress {
                if let Some(name) = path.file_name() {
                    progress.set_message(&name.to_string_lossy());
                }
            }

            match self.process_file(path, &filter, &mut sink) {
                Ok((matched, dropped)) => {
                    debug!(
                        "{}: {} records matched, {} rows dropped",
                        path.display(),
                        matched,
                        dropped
                    );
                    stats.files_used += 1;
                    stats.rows_matched += matched;
                    stats.rows_dropped += dropped;
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    stats.skipped_files.push(SkippedFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            if let Some(progress) = progress {
                progress.increment(1);
            }
        }

        info!("{}", stats.summary());
        Ok((sink.finish(), stats))
    }

    /// Returns the number of records kept by the filter and the number of
    /// rows dropped as malformed.
    fn process_file(
        &self,
        path: &Path,
        filter: &YearMonthFilter,
        sink: &mut ReportSink,
    ) -> Result<(usize, usize)> {
        let content = self.files.read_to_string(path)?;

        let mut records = self.parser.parse(&content).map_err(|e| match e {
            WeatherError::Csv(csv_error) => WeatherError::UnparsableFile {
                path: path.to_path_buf(),
                reason: csv_error.to_string(),
            },
            other => other,
        })?;

        let matched = sink.add_file(filter.apply(records.by_ref()));
        Ok((matched, records.dropped()))
    }
}

impl Default for ReportProcessor {
    fn default() -> Self {
        Self::new()
    }
}
