//! # Services Module
//!
//! Communication with the expense API server.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! └── api/         - HTTP client and typed endpoints
//!                    (auth, balance, cards, summary, export)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 App / SessionController / ViewSync      │
//! │                                                         │
//! │  ┌──────────────────┐       ┌──────────────────┐       │
//! │  │  api::cards      │  ...  │  api::auth       │       │
//! │  └────────┬─────────┘       └────────┬─────────┘       │
//! │           └────────────┬─────────────┘                 │
//! │                 ┌──────▼───────┐                       │
//! │                 │  ApiClient   │──── 401 ──▶ Session   │
//! │                 └──────┬───────┘                       │
//! │                 ┌──────▼───────┐                       │
//! │                 │ HttpBackend  │ (reqwest + cookies)   │
//! │                 └──────┬───────┘                       │
//! └────────────────────────┼────────────────────────────────┘
//!                          │ HTTP/JSON
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  Expense API Server                                     │
//! │  /api/auth/*  /api/balance  /api/cards/*  /api/export/* │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`crate::core::error::Result`]:
//! - Local validation failures: `ClientError::Validation`, nothing sent
//! - 401: `ClientError::Unauthorized`, session signed out unless opted out
//! - Other statuses: `ClientError::RequestFailed` with the server's message
//! - Connection problems: `ClientError::Network`
//!
//! ## Thread Safety
//!
//! `ApiClient` holds an `Arc<dyn HttpBackend>` and an `Arc<Session>`; it can
//! be shared across tasks behind an `Arc`.
//!
//! ## Configuration
//!
//! Base URL and timeout come from [`crate::config::ClientConfig`]. There is no
//! retry and no backoff; a failed call is reported once.

pub mod api;
