pub mod aggregator;
pub mod filter;
pub mod report;

pub use aggregator::{AverageAggregator, ExtremeAggregator, ExtremeTracker};
pub use filter::YearMonthFilter;
pub use report::{ProcessingStats, Report, ReportMode, ReportProcessor, ReportQuery, SkippedFile};
