//! # Expense Client - Library Root
//!
//! Session-aware client for the Organizador Financeiro expense API.
//! This library crate contains all modules used by the binary crate (`main.rs`).
//!
//! ## Features
//!
//! - **Session lifecycle**: cookie-backed login, registration, resume and logout
//! - **Unified request handling**: one error model, forced sign-out on 401
//! - **Consistent views**: balance, summary and card list refetched in order
//!   after every write, with stale results discarded
//! - **Spreadsheet export**: raw `.xlsx` download
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              expense-client (this crate)               │
//! ├────────────────────────────────────────────────────────┤
//! │  clap          - Command line                           │
//! │  Tokio         - Async runtime                          │
//! │  Reqwest       - HTTP client with cookie store          │
//! │  tracing       - Structured logging to rolling files    │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP (JSON, session cookie)
//!          ▼
//! ┌─────────────────┐
//! │  Expense API    │
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`App`] facade, session state machine and view synchronization
//! - **services**: HTTP client and one module per API resource
//! - **core**: error type and the HTTP backend seam
//! - **config**: API location and timeouts from the environment
//! - **debug**: tracing subscriber setup
//! - **cli**: command-line arguments and text rendering
//! - **utils**: input validation and user-facing messages
//!
//! ```text
//! main.rs ──► cli
//!    │
//!    ▼
//!   app ──► services::api ──► core::service (HttpBackend)
//!    │            │
//!    └──► utils ◄─┘
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

pub use app::{App, AppEvent};
pub use config::ClientConfig;
pub use core::error::{ClientError, Result};
