//! # Response Payloads
//!
//! Turns a raw HTTP body into something the transport can classify.
//! The server mostly answers JSON, but proxies and crashed workers answer
//! plain text or HTML, and those texts are still worth showing.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::{ClientError, Result};

/// A response body after the best-effort parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204, or an empty body
    Null,
    /// The body parsed as JSON
    Json(Value),
    /// Anything that is not JSON, kept as text
    Text(String),
}

impl Payload {
    pub fn parse(status: StatusCode, body: &[u8]) -> Self {
        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Payload::Null;
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Message carried by an error body, looked up in order:
    /// `detail`, then `message`, then the body itself when it is a string.
    pub fn server_message(&self) -> Option<String> {
        match self {
            Payload::Json(Value::Object(map)) => map
                .get("detail")
                .and_then(detail_text)
                .or_else(|| map.get("message").and_then(non_empty_str)),
            Payload::Json(value) => non_empty_str(value),
            Payload::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Payload::Null => None,
        }
    }

    /// Decode a successful payload into `T`. `Null` decodes as JSON `null`,
    /// so `()` and `Option<_>` targets accept empty bodies.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            Payload::Null => Value::Null,
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(ClientError::from)
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// `detail` is a string for handled errors and a list of
/// `{loc, msg, type}` objects for request validation errors.
fn detail_text(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => non_empty_str(value),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .filter(|msg| !msg.is_empty())
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
