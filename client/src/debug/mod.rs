//! # Logging Infrastructure
//!
//! File-based structured logging for the expense client.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/expense-client.log` with daily rotation
//! - **Request spans**: every API call carries a request id (see
//!   [`crate::services::api::client`])
//! - **Panic logging**: panics are written to the log before unwinding
//!
//! ## Usage
//!
//! ```rust,no_run
//! // Initialize at startup
//! expense_client::debug::init();
//!
//! tracing::info!(endpoint = "/cards", duration_ms = 12, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `expense_client=debug,info`)
//! - `EXPENSES_LOG_DIR`: Log directory (default: `logs`)
//! - `EXPENSES_LOG_STDERR`: Mirror logs to stderr (1=on, 0=off)
//! - `EXPENSES_LOG_FORMAT`: `json` writes the log file as JSON lines

pub mod config;
pub mod logger;

pub use config::DebugConfig;

/// Initialize logging from the environment
///
/// Call this at application startup, before any other operations.
pub fn init() {
    logger::init(&DebugConfig::from_env());
}
