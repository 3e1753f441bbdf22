//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the expense client and the
//! Organizador Financeiro API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Credentials and user identity
//!   - **[`dto::balance`]**: Net balance read/write bodies
//!   - **[`dto::cards`]**: Expense cards, card payloads and the summary
//! - **[`utils`]**: Display helpers (money, percentages, titles)
//!
//! ## Wire Format
//!
//! - Field names are **snake_case** in Rust and on the wire
//! - Enums serialize to lowercase Portuguese identifiers (`casa`, `pendente`, `verde`)
//! - Dates use ISO-8601 calendar dates (`2025-03-10`)
//! - Server-computed fields (`percentage`, summary totals) are only ever deserialized
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::cards::{ExpenseType, Summary, Zone};
//! use shared::utils::format_currency;
//!
//! let summary: Summary = serde_json::from_str(
//!     r#"{"zone":"amarelo","total_expenses":1250.5,"total_percentage":62.5,"cards_count":3}"#,
//! ).unwrap();
//!
//! assert_eq!(summary.zone, Zone::Amarelo);
//! assert_eq!(format_currency(summary.total_expenses), "R$ 1.250,50");
//! assert_eq!(ExpenseType::Saude.label(), "Saúde");
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
