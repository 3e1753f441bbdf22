//! # Export Endpoint

use super::client::{ApiClient, RequestOptions};
use crate::core::error::Result;

/// Suggested file name, as sent in the server's `Content-Disposition`
pub const SPREADSHEET_FILE_NAME: &str = "financas.xlsx";

/// Download the `.xlsx` workbook with every card and the summary
#[tracing::instrument(skip(client))]
pub async fn export_spreadsheet(client: &ApiClient) -> Result<Vec<u8>> {
    let bytes = client
        .request_bytes("/export/spreadsheet", RequestOptions::get())
        .await?;
    tracing::info!(size_bytes = bytes.len(), "Spreadsheet exported");
    Ok(bytes)
}
