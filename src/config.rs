//! Runtime configuration resolved from flags and environment variables.

use std::path::PathBuf;

use anyhow::Result;

use crate::utils::get_database_path;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "JOT_DB";

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "JOT_LOG";

/// Log filter used when `JOT_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolved settings for one run of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding the note slot.
    pub db_path: PathBuf,
    /// `tracing-subscriber` filter directive, e.g. `info` or `jot=debug`.
    pub log_filter: String,
}

impl Config {
    /// Resolves the configuration.
    ///
    /// The database path comes from `db_path_override` if given, then the
    /// `JOT_DB` environment variable, then the platform data directory.
    /// The log filter comes from `JOT_LOG`, defaulting to `warn`.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the data directory cannot
    /// be determined.
    pub fn resolve(db_path_override: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path_override.or_else(|| env_path(DB_PATH_ENV)) {
            Some(path) => path,
            None => get_database_path()?,
        };

        let log_filter = std::env::var(LOG_FILTER_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            log_filter,
        })
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
