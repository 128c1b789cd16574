/// Date column labels seen across station exports, in lookup priority order
pub const DATE_COLUMN_ALIASES: [&str; 3] = ["PKT", "PKST", "GST"];

/// Measurement column names
pub const MAX_TEMP_COLUMN: &str = "Max TemperatureC";
pub const MIN_TEMP_COLUMN: &str = "Min TemperatureC";
pub const MAX_HUMIDITY_COLUMN: &str = "Max Humidity";

/// Station file discovery
pub const DEFAULT_FILE_EXTENSION: &str = "txt";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WEATHERMAN";

/// Chart rendering
pub const CHART_BAR_GLYPH: char = '+';
pub const CHART_NO_DATA: &str = "No data available for chart";
/// Longest bar drawn for a single reading
pub const CHART_MAX_BAR: usize = 100;
