//! # Authentication Endpoints
//!
//! `/auth/*` calls. All of them opt out of the forced sign-out on 401: a 401
//! here means wrong credentials or no session yet, not an expired one.

use serde_json::Value;
use shared::{Credentials, UserInfo};

use super::client::{ApiClient, RequestOptions};
use crate::core::error::Result;

/// Who the session cookie belongs to
#[tracing::instrument(skip(client))]
pub async fn current_user(client: &ApiClient) -> Result<UserInfo> {
    client
        .request("/auth/me", RequestOptions::get().skip_auth_on_401())
        .await
}

/// Login with username and password.
#[tracing::instrument(skip(client, credentials), fields(username = %credentials.username))]
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<UserInfo> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let options = RequestOptions::post().json(credentials)?.skip_auth_on_401();
    let result = client.request::<UserInfo>("/auth/login", options).await;

    match &result {
        Ok(user) => tracing::info!(
            user_id = user.id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Login successful"
        ),
        Err(e) => tracing::warn!(error = %e, "Login failed"),
    }
    result
}

/// Create an account; the server signs it in right away.
#[tracing::instrument(skip(client, credentials), fields(username = %credentials.username))]
pub async fn register(client: &ApiClient, credentials: &Credentials) -> Result<UserInfo> {
    let options = RequestOptions::post().json(credentials)?.skip_auth_on_401();
    client.request("/auth/register", options).await
}

/// Ask the server to clear the session cookie
#[tracing::instrument(skip(client))]
pub async fn logout(client: &ApiClient) -> Result<()> {
    client
        .request::<Value>("/auth/logout", RequestOptions::post().skip_auth_on_401())
        .await
        .map(|_| ())
}
