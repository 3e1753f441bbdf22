//! # Expense API Client Module
//!
//! Typed calls to the expense API, all going through one [`ApiClient`].
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports and documentation
//! ├── client.rs   - ApiClient, request options, reqwest backend
//! ├── payload.rs  - Response body parsing and error messages
//! ├── auth.rs     - Authentication endpoints (me, login, register, logout)
//! ├── balance.rs  - Balance endpoints
//! ├── cards.rs    - Card endpoints, filters and drafts
//! └── export.rs   - Spreadsheet export
//! ```

pub mod auth;
pub mod balance;
pub mod cards;
pub mod client;
pub mod export;
pub mod payload;

pub use cards::{CardDraft, CardFilters};
pub use client::{ApiClient, RequestOptions, ReqwestBackend};
pub use payload::Payload;
