//! # Application State Types
//!
//! Session status, the authentication prompt and the cached view data.

use shared::{Balance, ExpenseCard, Summary, UserInfo};

/// Authentication state machine
///
/// An expired session is `Anonymous` with a prompt message pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Anonymous,
    /// A login or register request is in flight
    Authenticating,
    Authenticated,
}

/// Which form the authentication prompt shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    /// Tab title
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Entrar",
            AuthMode::Register => "Cadastrar",
        }
    }
}

/// Open authentication prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthPrompt {
    pub mode: AuthMode,
    /// Error or notice shown above the form
    pub message: Option<String>,
}

impl AuthPrompt {
    pub fn login(message: Option<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            message,
        }
    }
}

/// Server data as last fetched in the current session
///
/// Nothing here is derived locally. Every field is replaced wholesale by a
/// fetch and cleared on sign-out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCache {
    pub balance: Option<Balance>,
    pub summary: Option<Summary>,
    pub cards: Option<Vec<ExpenseCard>>,
    /// The dashboard could not be loaded at startup
    pub connection_error: bool,
}

impl ViewCache {
    pub fn is_empty(&self) -> bool {
        self.balance.is_none() && self.summary.is_none() && self.cards.is_none()
    }
}

/// Point-in-time copy of the whole session, for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub user: Option<UserInfo>,
    pub prompt: Option<AuthPrompt>,
    pub epoch: u64,
    pub view: ViewCache,
}
