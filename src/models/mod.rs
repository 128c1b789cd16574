pub mod daily;
pub mod summary;

pub use daily::{DailyRecord, MissingValuePolicy, Period};
pub use summary::{AveragingStrategy, ExtremeResult, ExtremeSummary, MonthlyAverages, RunningMean};
