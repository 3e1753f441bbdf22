//! # Application Events
//!
//! Notifications sent from the session to whatever renders it.

use shared::UserInfo;

use crate::app::state::{AuthPrompt, SessionStatus};

/// Session and view notifications
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Status or user identity changed
    SessionChanged {
        status: SessionStatus,
        user: Option<UserInfo>,
    },
    /// The authentication prompt opened, or its content changed
    PromptLogin(AuthPrompt),
    /// The authentication prompt closed after a successful login
    PromptClosed,
    /// Cached balance, summary or card list was replaced
    ViewUpdated,
    /// An operation failed and the message should be shown
    Error(String),
}
