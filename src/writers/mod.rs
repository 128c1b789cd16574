pub mod chart;
pub mod report_writer;

pub use chart::ChartRenderer;
pub use report_writer::ReportWriter;
