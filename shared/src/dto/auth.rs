use std::fmt;

use serde::{Deserialize, Serialize};

/// Login and register request body.
///
/// `Debug` is implemented by hand so the password never reaches a log line.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// User information (public, returned by `/auth/me`, `/auth/login` and `/auth/register`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "ana".to_string(),
            password: "s3cret".to_string(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("ana"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_user_info_accepts_server_payload() {
        let user: UserInfo = serde_json::from_str(
            r#"{"id": 3, "username": "ana", "created_at": "2025-01-02T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.username, "ana");
        assert_eq!(user.created_at.as_deref(), Some("2025-01-02T10:00:00"));
    }
}
