use crate::error::{Result, WeatherError};
use crate::utils::constants::DATE_COLUMN_ALIASES;

/// Finds the date column of a station file among a fixed, ordered list of
/// regional labels for the same column.
#[derive(Debug, Clone)]
pub struct DateColumnResolver {
    aliases: Vec<String>,
}

impl DateColumnResolver {
    pub fn new() -> Self {
        Self::with_aliases(DATE_COLUMN_ALIASES.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_aliases(aliases: Vec<String>) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Return the position in `columns` of the first alias, in priority
    /// order, that the header contains. Names are compared trimmed.
    pub fn resolve<S: AsRef<str>>(&self, columns: &[S]) -> Result<usize> {
        self.aliases
            .iter()
            .find_map(|alias| {
                columns
                    .iter()
                    .position(|column| column.as_ref().trim() == alias.as_str())
            })
            .ok_or_else(|| WeatherError::NoDateColumn {
                columns: columns.iter().map(|c| c.as_ref().trim().to_string()).collect(),
            })
    }
}

impl Default for DateColumnResolver {
    fn default() -> Self {
        Self::new()
    }
}
