//! Folding filtered records into report results.
//!
//! Both modes first reduce each file on its own and then merge the per-file
//! results, so one station never sees another station's rows.

use chrono::NaiveDate;

use crate::models::{
    AveragingStrategy, DailyRecord, ExtremeResult, ExtremeSummary, MissingValuePolicy,
    MonthlyAverages, Period, RunningMean,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Highest,
    Lowest,
}

/// Best value of one metric. Only a strictly better value replaces the
/// current one, so ties keep the first value seen.
#[derive(Debug, Clone, Copy)]
pub struct ExtremeTracker {
    direction: Direction,
    best: Option<ExtremeResult>,
}

impl ExtremeTracker {
    pub fn highest() -> Self {
        Self {
            direction: Direction::Highest,
            best: None,
        }
    }

    pub fn lowest() -> Self {
        Self {
            direction: Direction::Lowest,
            best: None,
        }
    }

    pub fn best(&self) -> Option<ExtremeResult> {
        self.best
    }

    pub fn observe(&mut self, value: Option<f64>, date: NaiveDate) {
        if let Some(value) = value {
            self.offer(ExtremeResult::new(value, date));
        }
    }

    pub fn offer(&mut self, candidate: ExtremeResult) {
        if candidate.value.is_nan() {
            return;
        }

        let improves = match self.best {
            None => true,
            Some(best) => match self.direction {
                Direction::Highest => candidate.value > best.value,
                Direction::Lowest => candidate.value < best.value,
            },
        };

        if improves {
            self.best = Some(candidate);
        }
    }

    pub fn merge(&mut self, other: &ExtremeTracker) {
        if let Some(candidate) = other.best {
            self.offer(candidate);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ExtremeSet {
    highest_temp: ExtremeTracker,
    lowest_temp: ExtremeTracker,
    most_humid: ExtremeTracker,
}

impl ExtremeSet {
    fn new() -> Self {
        Self {
            highest_temp: ExtremeTracker::highest(),
            lowest_temp: ExtremeTracker::lowest(),
            most_humid: ExtremeTracker::highest(),
        }
    }

    fn observe(&mut self, record: &DailyRecord, policy: MissingValuePolicy) {
        self.highest_temp
            .observe(policy.resolve(record.max_temp_c), record.date);
        self.lowest_temp
            .observe(policy.resolve(record.min_temp_c), record.date);
        self.most_humid
            .observe(policy.resolve(record.max_humidity), record.date);
    }

    fn merge(&mut self, other: &ExtremeSet) {
        self.highest_temp.merge(&other.highest_temp);
        self.lowest_temp.merge(&other.lowest_temp);
        self.most_humid.merge(&other.most_humid);
    }
}

/// Running highest temperature, lowest temperature and highest humidity
/// across files.
pub struct ExtremeAggregator {
    period: Period,
    policy: MissingValuePolicy,
    totals: ExtremeSet,
}

impl ExtremeAggregator {
    pub fn new(period: Period, policy: MissingValuePolicy) -> Self {
        Self {
            period,
            policy,
            totals: ExtremeSet::new(),
        }
    }

    /// Reduce one file's records to its local extremes and merge them into
    /// the totals. Returns the number of records folded.
    pub fn add_file<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = DailyRecord>,
    {
        let mut local = ExtremeSet::new();
        let mut rows = 0;

        for record in records {
            local.observe(&record, self.policy);
            rows += 1;
        }

        self.totals.merge(&local);
        rows
    }

    pub fn finish(self) -> ExtremeSummary {
        ExtremeSummary {
            period: self.period,
            highest_temp: self.totals.highest_temp.best(),
            lowest_temp: self.totals.lowest_temp.best(),
            most_humid: self.totals.most_humid.best(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct FileMeans {
    highest_temp: RunningMean,
    lowest_temp: RunningMean,
    humidity: RunningMean,
}

/// Monthly averages across files.
pub struct AverageAggregator {
    period: Period,
    policy: MissingValuePolicy,
    strategy: AveragingStrategy,
    files: Vec<FileMeans>,
}

impl AverageAggregator {
    pub fn new(period: Period, policy: MissingValuePolicy, strategy: AveragingStrategy) -> Self {
        Self {
            period,
            policy,
            strategy,
            files: Vec::new(),
        }
    }

    /// Accumulate one file's sums and counts. A file with no records adds no
    /// entry at all. Returns the number of records folded.
    pub fn add_file<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = DailyRecord>,
    {
        let mut means = FileMeans::default();
        let mut rows = 0;

        for record in records {
            let values = [
                (&mut means.highest_temp, record.max_temp_c),
                (&mut means.lowest_temp, record.min_temp_c),
                (&mut means.humidity, record.max_humidity),
            ];
            for (mean, value) in values {
                if let Some(value) = self.policy.resolve(value) {
                    mean.push(value);
                }
            }
            rows += 1;
        }

        if rows > 0 {
            self.files.push(means);
        }
        rows
    }

    pub fn files(&self) -> usize {
        self.files.len()
    }

    pub fn finish(self) -> MonthlyAverages {
        let combine = |metric: fn(&FileMeans) -> RunningMean| {
            let per_file: Vec<RunningMean> = self.files.iter().map(metric).collect();
            self.strategy.combine(&per_file)
        };

        MonthlyAverages {
            period: self.period,
            highest_temp: combine(|f| f.highest_temp),
            lowest_temp: combine(|f| f.lowest_temp),
            humidity: combine(|f| f.humidity),
        }
    }
}

impl AveragingStrategy {
    pub fn combine(&self, per_file: &[RunningMean]) -> Option<f64> {
        match self {
            AveragingStrategy::EqualWeightPerFile => mean_of_file_means(per_file),
            AveragingStrategy::RowWeighted => row_weighted_mean(per_file),
        }
    }
}

/// Average of each file's own mean. Files without values are left out, so a
/// station with one day weighs as much as a station with a hundred.
pub fn mean_of_file_means(per_file: &[RunningMean]) -> Option<f64> {
    let means: Vec<f64> = per_file.iter().filter_map(RunningMean::mean).collect();
    if means.is_empty() {
        None
    } else {
        Some(means.iter().sum::<f64>() / means.len() as f64)
    }
}

/// Average over every value of every file.
pub fn row_weighted_mean(per_file: &[RunningMean]) -> Option<f64> {
    let total = per_file.iter().fold(RunningMean::default(), |acc, m| RunningMean {
        sum: acc.sum + m.sum,
        count: acc.count + m.count,
    });
    total.mean()
}
