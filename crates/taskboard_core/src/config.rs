//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Decide where state and logs live and which log level applies.
//!
//! # Invariants
//! - Precedence is explicit value > environment variable > built-in default.
//! - Resolution never fails; unusable environment values fall back to defaults.

use crate::logging::{default_log_level, LogLevel};
use log::warn;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "TASKBOARD_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "TASKBOARD_LOG_LEVEL";

const APP_DIR_NAME: &str = "taskboard";
const DB_FILE_NAME: &str = "taskboard.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Resolves settings from explicit overrides and the process environment.
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<LogLevel>) -> Self {
        Self::resolve_with(data_dir, log_level, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::resolve`] with an injectable environment lookup.
    pub fn resolve_with(
        data_dir: Option<PathBuf>,
        log_level: Option<LogLevel>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let data_dir = data_dir
            .or_else(|| non_blank(env(DATA_DIR_ENV)).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let log_level = log_level
            .or_else(|| {
                let raw = non_blank(env(LOG_LEVEL_ENV))?;
                match raw.parse::<LogLevel>() {
                    Ok(level) => Some(level),
                    Err(err) => {
                        warn!("event=config_resolve module=config status=fallback key={LOG_LEVEL_ENV} error={err}");
                        None
                    }
                }
            })
            .unwrap_or_else(default_log_level);

        Self {
            data_dir: absolutize(data_dir),
            log_level,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

// Logging requires an absolute directory.
fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or_else(|_| Path::new("/").join(path))
}
