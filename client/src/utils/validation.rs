//! Validation utilities for user input
//!
//! Everything here runs before a request is built. A failure is always a
//! [`ClientError::Validation`], so callers can tell it apart from anything
//! the server said.

use chrono::NaiveDate;
use shared::Credentials;

use super::constants::{
    INVALID_BALANCE, INVALID_CARD_VALUE, INVALID_DUE_DATE, INVALID_URGENCY, MISSING_CREDENTIALS,
};
use crate::core::error::{ClientError, Result};

/// Parse a decimal typed by the user.
///
/// Accepts either `,` or `.` as the fractional separator, but not both and not
/// more than one. Thousands grouping, exponents and `inf`/`NaN` are rejected.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let separators = trimmed.chars().filter(|c| *c == ',' || *c == '.').count();
    if separators > 1 {
        return None;
    }

    let unsigned = trimmed.strip_prefix(&['-', '+'][..]).unwrap_or(trimmed);
    if unsigned.is_empty()
        || !unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
        || !unsigned.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Validate a balance input: a number greater than or equal to zero
pub fn validate_balance(raw: &str) -> Result<f64> {
    match parse_decimal(raw) {
        Some(value) if value >= 0.0 => Ok(value),
        _ => Err(ClientError::validation(INVALID_BALANCE)),
    }
}

/// Validate a card value: a finite number strictly greater than zero
pub fn validate_card_value(raw: &str) -> Result<f64> {
    match parse_decimal(raw) {
        Some(value) if value > 0.0 => Ok(value),
        _ => Err(ClientError::validation(INVALID_CARD_VALUE)),
    }
}

/// Validate urgency: an integer, 1 being the highest priority
pub fn validate_urgency(raw: &str) -> Result<i32> {
    match raw.trim().parse::<i32>() {
        Ok(urgency) if urgency >= 1 => Ok(urgency),
        _ => Err(ClientError::validation(INVALID_URGENCY)),
    }
}

/// Validate a due date in `YYYY-MM-DD` form
pub fn validate_due_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ClientError::validation(INVALID_DUE_DATE))
}

/// Validate login/register input. The username is trimmed, the password is not.
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ClientError::validation(MISSING_CREDENTIALS));
    }

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
