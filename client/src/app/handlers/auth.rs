//! # Authentication Handlers
//!
//! Drives the session through login, register, logout and startup.

use std::sync::Arc;

use shared::UserInfo;

use crate::app::session::Session;
use crate::app::state::{AuthMode, AuthPrompt, SessionStatus};
use crate::core::error::{ClientError, Result};
use crate::services::api::{auth, ApiClient};
use crate::utils::constants::{LOGIN_INTERRUPTED, LOGIN_REQUIRED};
use crate::utils::validation::validate_credentials;

pub struct SessionController {
    api: Arc<ApiClient>,
}

impl SessionController {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn session(&self) -> &Arc<Session> {
        self.api.session()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo> {
        self.login_or_register(AuthMode::Login, username, password)
            .await
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<UserInfo> {
        self.login_or_register(AuthMode::Register, username, password)
            .await
    }

    /// Validate, call the matching endpoint and move the session accordingly.
    ///
    /// Empty fields fail locally and only update the prompt message. A server
    /// error leaves the session anonymous with the server's message verbatim.
    pub async fn login_or_register(
        &self,
        mode: AuthMode,
        username: &str,
        password: &str,
    ) -> Result<UserInfo> {
        let credentials = match validate_credentials(username, password) {
            Ok(credentials) => credentials,
            Err(e) => {
                self.session().show_prompt(AuthPrompt {
                    mode,
                    message: Some(e.message().to_string()),
                });
                return Err(e);
            }
        };

        let epoch = self.session().begin_authentication();
        let result = match mode {
            AuthMode::Login => auth::login(&self.api, &credentials).await,
            AuthMode::Register => auth::register(&self.api, &credentials).await,
        };

        match result {
            Ok(user) => {
                if self.session().authenticate(epoch, user.clone()).is_none() {
                    tracing::warn!(
                        username = %user.username,
                        "Session changed during sign-in, reply dropped"
                    );
                    return Err(ClientError::Unauthorized {
                        message: LOGIN_INTERRUPTED.to_string(),
                    });
                }
                Ok(user)
            }
            Err(e) => {
                self.session()
                    .reject_authentication(epoch, mode, e.message().to_string());
                Err(e)
            }
        }
    }

    /// Best-effort server logout; the local session is dropped either way
    pub async fn logout(&self) {
        if let Err(e) = auth::logout(&self.api).await {
            tracing::warn!(error = %e, "Logout request failed, signing out locally");
        }
        self.session().force_sign_out(None);
    }

    /// Resume an existing server session, if the cookie jar holds one.
    ///
    /// `Ok(None)` means nobody is signed in and the prompt is open. Failures
    /// other than 401 are returned.
    pub async fn bootstrap(&self) -> Result<Option<UserInfo>> {
        let epoch = self.session().epoch();
        match auth::current_user(&self.api).await {
            Ok(user) => Ok(self.session().authenticate(epoch, user.clone()).map(|_| user)),
            Err(e) if e.is_unauthorized() => {
                tracing::debug!("No active session");
                self.session().expire(epoch, None);
                Ok(None)
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not check the current session");
                Err(e)
            }
        }
    }

    pub fn force_sign_out(&self, message: Option<&str>) -> bool {
        self.session().force_sign_out(message)
    }

    pub fn switch_mode(&self, mode: AuthMode) {
        self.session().switch_prompt_mode(mode);
    }

    /// Gate for commands that need a signed-in user. Opens the prompt when
    /// there is none; a sign-in in progress is left to finish.
    pub fn require_session(&self) -> Result<()> {
        match self.session().status() {
            SessionStatus::Authenticated => return Ok(()),
            SessionStatus::Authenticating => {}
            SessionStatus::Anonymous => {
                self.session().force_sign_out(Some(LOGIN_REQUIRED));
            }
        }
        Err(ClientError::Unauthorized {
            message: LOGIN_REQUIRED.to_string(),
        })
    }
}
