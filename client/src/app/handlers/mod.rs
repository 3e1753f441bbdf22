//! # Event Handlers
//!
//! Session and view orchestration, split by concern.
//!
//! - [`auth`]: the authentication state machine driver ([`SessionController`])
//! - [`sync`]: mutate-then-refetch and dashboard loading ([`ViewSync`])

pub mod auth;
pub mod sync;

pub use auth::SessionController;
pub use sync::ViewSync;
