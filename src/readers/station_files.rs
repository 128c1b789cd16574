use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, WeatherError};
use crate::utils::constants::DEFAULT_FILE_EXTENSION;

/// Locates station files in a directory and loads their text.
pub struct StationFileReader {
    extension: String,
}

impl StationFileReader {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_FILE_EXTENSION)
    }

    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// List the station files directly inside `dir`, sorted by path.
    ///
    /// Fails only when `dir` itself is not a readable directory.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(WeatherError::InvalidDirectory(dir.to_path_buf()));
        }

        let entries =
            fs::read_dir(dir).map_err(|_| WeatherError::InvalidDirectory(dir.to_path_buf()))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.has_station_extension(path))
            .collect();

        files.sort();
        debug!("Found {} station files in {}", files.len(), dir.display());
        Ok(files)
    }

    fn has_station_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }

    /// Read a whole station file as UTF-8, dropping a leading byte order mark.
    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);

        if had_errors {
            return Err(WeatherError::UnparsableFile {
                path: path.to_path_buf(),
                reason: "invalid UTF-8".to_string(),
            });
        }

        Ok(text.into_owned())
    }
}

impl Default for StationFileReader {
    fn default() -> Self {
        Self::new()
    }
}
