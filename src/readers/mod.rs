pub mod date_column;
pub mod record_reader;
pub mod station_files;

pub use date_column::DateColumnResolver;
pub use record_reader::{parse_date, DailyRecords, RecordParser};
pub use station_files::StationFileReader;
