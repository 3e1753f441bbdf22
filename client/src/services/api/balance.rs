//! # Balance Endpoints

use shared::{Balance, BalanceUpdate};

use super::client::{ApiClient, RequestOptions};
use crate::core::error::Result;
use crate::utils::validation::validate_balance;

#[tracing::instrument(skip(client))]
pub async fn get_balance(client: &ApiClient) -> Result<Balance> {
    client.request("/balance", RequestOptions::get()).await
}

/// Set the balance from user input such as `"12,50"`.
///
/// Empty, non-numeric and negative input is rejected before any request.
#[tracing::instrument(skip(client))]
pub async fn put_balance(client: &ApiClient, raw: &str) -> Result<Balance> {
    let net_balance = validate_balance(raw)?;
    let options = RequestOptions::put().json(&BalanceUpdate { net_balance })?;
    client.request("/balance", options).await
}
