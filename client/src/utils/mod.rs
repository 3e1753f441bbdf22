//! # Utility Functions
//!
//! Shared utility functions used across the client.
//!
//! ## Modules
//!
//! - **[`constants`]**: Defaults and user-facing messages
//! - **[`validation`]**: Local input validation (credentials, amounts, dates)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Display formatting (money, percentages)
//! - [`crate::core`]: Core abstractions and error types

pub mod constants;
pub mod validation;
