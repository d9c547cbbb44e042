//! Configuration resolution from CLI args and the environment

use crate::cli::Args;
use crate::error::CliError;
use aoc_http_client::ClientConfig;
use chrono::Datelike;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable holding the adventofcode.com session cookie
pub const SESSION_VAR: &str = "SESSION";
/// Environment variable selecting the puzzle year
pub const YEAR_VAR: &str = "YEAR";
/// Optional file with `KEY=value` lines, read from the working directory
pub const ENV_FILE: &str = ".env";

/// Resolved runtime configuration
pub struct Config {
    /// Puzzle year
    pub year: u16,
    /// Session key (zeroized on drop)
    pub session: Zeroizing<String>,
    /// Root of the input cache
    pub inputs_dir: PathBuf,
}

impl Config {
    /// Build config from CLI args, the process environment and `.env`
    ///
    /// Variables set in the process environment win over the `.env` file.
    /// Fails when no session is configured, before any command runs.
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        Self::with_env_file(args, Path::new(ENV_FILE), |key| std::env::var(key).ok())
    }

    /// Build config from `env`, falling back to the variables in `env_file`
    fn with_env_file<F>(args: &Args, env_file: &Path, env: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = read_env_file(env_file)?;
        Self::resolve(args, |key| {
            env(key).or_else(|| file_vars.get(key).map(|value| value.to_string()))
        })
    }

    /// Build config with a custom environment lookup
    fn resolve<F>(args: &Args, env: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session = env(SESSION_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(Zeroizing::new)
            .ok_or_else(|| {
                CliError::Config(format!(
                    "{SESSION_VAR} is not set; export your adventofcode.com session cookie or put it in {ENV_FILE}"
                ))
            })?;

        let year = match (args.year, env(YEAR_VAR)) {
            (Some(year), _) => year,
            (None, Some(value)) => value
                .trim()
                .parse()
                .map_err(|_| CliError::Config(format!("Invalid {YEAR_VAR}: {value:?}")))?,
            (None, None) => current_year()?,
        };

        Ok(Config {
            year,
            session,
            inputs_dir: args.inputs_dir.clone(),
        })
    }

    /// Settings for the HTTP client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.year, self.session.as_str())
    }
}

/// Variables of a dotenv file; a missing file has none
fn read_env_file(path: &Path) -> Result<HashMap<String, Zeroizing<String>>, CliError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => {
            return Err(CliError::Config(format!("Failed to read {}: {}", path.display(), e)));
        }
    };

    let vars = iter
        .map(|item| item.map(|(key, value)| (key, Zeroizing::new(value))))
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(|e| CliError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), count = vars.len(), "loaded env file");
    Ok(vars)
}

fn current_year() -> Result<u16, CliError> {
    let year = chrono::Local::now().year();
    u16::try_from(year).map_err(|_| CliError::Config(format!("Unsupported year {year}")))
}
