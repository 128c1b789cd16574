//! Layered runtime settings: built-in defaults, then an optional config file,
//! then `WEATHERMAN_*` environment variables.

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::error::Result;
use crate::models::{AveragingStrategy, MissingValuePolicy};
use crate::utils::constants::{
    DATE_COLUMN_ALIASES, DEFAULT_FILE_EXTENSION, ENV_PREFIX, MAX_HUMIDITY_COLUMN,
    MAX_TEMP_COLUMN, MIN_TEMP_COLUMN,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    /// Date column aliases, checked in order.
    #[validate(
        length(min = 1, message = "at least one date column alias is required"),
        custom(function = "non_empty_names")
    )]
    pub date_columns: Vec<String>,

    #[validate(length(min = 1))]
    pub max_temp_column: String,

    #[validate(length(min = 1))]
    pub min_temp_column: String,

    #[validate(length(min = 1))]
    pub max_humidity_column: String,

    /// Station files are the directory entries with this extension.
    #[validate(length(min = 1))]
    pub file_extension: String,

    pub missing_values: MissingValuePolicy,

    pub averaging: AveragingStrategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_columns: DATE_COLUMN_ALIASES.iter().map(|s| s.to_string()).collect(),
            max_temp_column: MAX_TEMP_COLUMN.to_string(),
            min_temp_column: MIN_TEMP_COLUMN.to_string(),
            max_humidity_column: MAX_HUMIDITY_COLUMN.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            missing_values: MissingValuePolicy::default(),
            averaging: AveragingStrategy::default(),
        }
    }
}

impl Settings {
    /// Load settings, letting `config_file` and then the environment
    /// override the defaults.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = config_file {
            debug!("Using config file: {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("date_columns"),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }
}

// A blank alias would match any blank header cell.
#[allow(clippy::ptr_arg)]
fn non_empty_names(names: &Vec<String>) -> std::result::Result<(), ValidationError> {
    if names.iter().any(|name| name.trim().is_empty()) {
        let mut error = ValidationError::new("empty_name");
        error.message = Some("date column aliases must not be blank".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::Builder;

    // Tests that load layered settings read the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();

        assert!(settings.validate().is_ok());

        let no_aliases = Settings {
            date_columns: Vec::new(),
            ..Settings::default()
        };
        assert!(no_aliases.validate().is_err());
        assert_eq!(settings.date_columns, vec!["PKT", "PKST", "GST"]);
        assert_eq!(settings.missing_values, MissingValuePolicy::TreatAsZero);
        assert_eq!(settings.averaging, AveragingStrategy::EqualWeightPerFile);
    }

    #[test]
    fn test_config_file_overrides_defaults() -> Result<()> {
        let _guard = env_lock();
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "file_extension = \"csv\"")?;
        writeln!(file, "missing_values = \"skip\"")?;
        writeln!(file, "date_columns = [\"GST\", \"PKT\"]")?;

        let settings = Settings::load_layered(Some(file.path()))?;

        assert_eq!(settings.file_extension, "csv");
        assert_eq!(settings.missing_values, MissingValuePolicy::Skip);
        assert_eq!(settings.date_columns, vec!["GST", "PKT"]);
        assert_eq!(settings.max_temp_column, MAX_TEMP_COLUMN);
        Ok(())
    }

    #[test]
    fn test_empty_column_name_is_rejected() -> Result<()> {
        let _guard = env_lock();
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "max_temp_column = \"\"")?;

        assert!(Settings::load_layered(Some(file.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_blank_date_alias_is_rejected() -> Result<()> {
        let blank = Settings {
            date_columns: vec!["".into()],
            ..Settings::default()
        };
        assert!(blank.validate().is_err());

        let padded = Settings {
            date_columns: vec!["PKT".into(), "  ".into()],
            ..Settings::default()
        };
        assert!(padded.validate().is_err());

        let _guard = env_lock();
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "date_columns = [\"PKT\", \"\"]")?;

        assert!(matches!(
            Settings::load_layered(Some(file.path())),
            Err(crate::WeatherError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_environment_overrides_date_columns() -> Result<()> {
        let _guard = env_lock();
        std::env::set_var("WEATHERMAN_DATE_COLUMNS", "GST,PKT");
        let loaded = Settings::load_layered(None);
        std::env::remove_var("WEATHERMAN_DATE_COLUMNS");

        let settings = loaded?;
        assert_eq!(settings.date_columns, vec!["GST", "PKT"]);
        assert_eq!(settings.file_extension, DEFAULT_FILE_EXTENSION);
        Ok(())
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let _guard = env_lock();
        let result = Settings::load_layered(Some(Path::new("/nonexistent/weatherman.toml")));
        assert!(result.is_err());
    }
}
