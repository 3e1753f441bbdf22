//! # Common Error Types
//!
//! Consolidated error handling for the expense client.
//!
//! Every fallible operation in the crate returns [`ClientError`]. The variants
//! follow where a failure originates, which also decides how far it travels:
//!
//! - **Validation**: rejected locally before any network call (empty
//!   credentials, non-positive card value). Returned to the caller only.
//! - **Unauthorized**: the server answered 401. Besides being returned, it
//!   forces the session back to anonymous unless the request opted out.
//! - **RequestFailed**: any other non-2xx answer, with the resolved message.
//! - **Network**: the request never produced an HTTP answer.
//! - **Decode**: a 2xx answer whose body does not match the expected shape.
//!
//! `Display` renders the bare message so UI code can show it verbatim.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use expense_client::core::error::ClientError;
//!
//! let err = ClientError::RequestFailed {
//!     status: 404,
//!     message: "Card não encontrado".to_string(),
//! };
//!
//! assert_eq!(err.to_string(), "Card não encontrado");
//! assert_eq!(err.status(), Some(404));
//! assert!(!err.is_validation());
//! ```

use thiserror::Error;

/// Client-wide error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// Input rejected locally; the server was never contacted.
    #[error("{0}")]
    Validation(String),

    /// HTTP 401 from the server.
    #[error("{message}")]
    Unauthorized { message: String },

    /// Any non-2xx status other than 401.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// Transport-level failure (connection refused, DNS, TLS, broken body).
    #[error("{0}")]
    Network(String),

    /// A successful response whose body could not be decoded.
    #[error("{0}")]
    Decode(String),
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The human-readable message, as displayed to the user
    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation(message)
            | ClientError::Network(message)
            | ClientError::Decode(message) => message,
            ClientError::Unauthorized { message } | ClientError::RequestFailed { message, .. } => {
                message
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(format!("Failed to parse response: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_bare_message() {
        let err = ClientError::Unauthorized {
            message: "Credenciais inválidas".to_string(),
        };
        assert_eq!(err.to_string(), "Credenciais inválidas");
        assert_eq!(err.message(), "Credenciais inválidas");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_kind_predicates() {
        assert!(ClientError::validation("x").is_validation());
        assert!(ClientError::network("down").is_network());
        assert!(!ClientError::network("down").is_unauthorized());
        assert_eq!(ClientError::network("down").status(), None);
    }
}
