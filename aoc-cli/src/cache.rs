//! Input cache for storing puzzle inputs locally

use crate::error::{CacheError, CliError};
use std::fs;
use std::path::PathBuf;

/// File-based cache for puzzle inputs
///
/// Directory structure: `{inputs_dir}/{year}/{day}.txt`. A cached file holds
/// the input exactly as it was fetched and is never refreshed.
pub struct InputCache {
    inputs_dir: PathBuf,
}

impl InputCache {
    pub fn new(inputs_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs_dir: inputs_dir.into(),
        }
    }

    /// Get the cache path for a specific year/day
    pub fn cache_path(&self, year: u16, day: u8) -> PathBuf {
        self.inputs_dir
            .join(year.to_string())
            .join(format!("{day}.txt"))
    }

    /// Check if input is cached
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.cache_path(year, day).is_file()
    }

    /// Get cached input or None if not cached
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, CacheError> {
        if self.contains(year, day) {
            let content = fs::read_to_string(self.cache_path(year, day))?;
            Ok(Some(content))
        } else {
            Ok(None)
        }
    }

    /// Store input in cache
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), CacheError> {
        let path = self.cache_path(year, day);

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                CacheError::DirCreation(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        fs::write(&path, input)?;
        tracing::debug!(year, day, path = %path.display(), "cached input");
        Ok(())
    }

    /// Return the cached input, or call `fetch` and cache what it returns
    ///
    /// A failed fetch leaves the cache untouched and is reported as
    /// [`CliError::InputFetch`] for the day.
    pub fn get_or_fetch<F, E>(&self, year: u16, day: u8, fetch: F) -> Result<String, CliError>
    where
        F: FnOnce() -> Result<String, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if let Some(input) = self.get(year, day)? {
            tracing::debug!(year, day, "input cache hit");
            return Ok(input);
        }

        tracing::info!(year, day, "input not cached, fetching");
        let input = fetch().map_err(|e| CliError::InputFetch {
            day,
            source: e.into(),
        })?;
        self.put(year, day, &input)?;
        Ok(input)
    }
}
