//! Debug configuration from environment variables

use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "expense_client=info,warn";
const LOG_FILE_NAME: &str = "expense-client.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log file name prefix inside `log_dir`
    pub log_file_name: String,
    /// Log level filter (e.g., "expense_client=debug,info")
    pub log_level: String,
    /// Mirror log lines to stderr
    pub log_to_stderr: bool,
    /// Write the file log as JSON lines
    pub log_json: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file_name: LOG_FILE_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: false,
            log_json: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    ///
    /// - `EXPENSES_LOG_DIR`: log directory (default `logs`)
    /// - `RUST_LOG`: filter directives
    /// - `EXPENSES_LOG_STDERR`: `1` mirrors logs to stderr
    /// - `EXPENSES_LOG_FORMAT`: `json` for JSON lines in the file log
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_dir: var("EXPENSES_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            log_file_name: LOG_FILE_NAME.to_string(),
            log_level: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_to_stderr: var("EXPENSES_LOG_STDERR").is_some_and(|v| v == "1"),
            log_json: var("EXPENSES_LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        }
    }

    /// Full path of the current log file (before the rotation suffix)
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(&self.log_file_name)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
