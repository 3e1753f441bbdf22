//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the expense API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login/register credentials and the public user record
//! - [`balance`] - Net balance
//! - [`cards`] - Expense cards, card write payloads and the derived summary
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/cards
//! Content-Type: application/json
//!
//! {
//!   "title": "Aluguel",
//!   "urgency": 1,
//!   "expense_type": "casa",
//!   "value": 1500.0,
//!   "due_date": "2025-03-10",
//!   "status": "pendente"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 201 Created
//! Content-Type: application/json
//!
//! {
//!   "id": 7,
//!   "title": "Aluguel",
//!   "urgency": 1,
//!   "expense_type": "casa",
//!   "value": 1500.0,
//!   "due_date": "2025-03-10",
//!   "status": "pendente",
//!   "percentage": 50.0
//! }
//! ```

pub mod auth;
pub mod balance;
pub mod cards;

pub use auth::*;
pub use balance::*;
pub use cards::*;
