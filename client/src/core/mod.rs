//! # Core Abstractions
//!
//! Core traits and error types shared by every layer of the client.
//!
//! ## Modules
//!
//! - **[`error`]**: Client error type (`ClientError`, `Result<T>`)
//! - **[`service`]**: The HTTP backend seam (`HttpBackend`, `HttpRequest`, `HttpResponse`)
//!
//! ## Dependency Injection
//!
//! The transport talks to the network only through [`HttpBackend`]:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use expense_client::core::service::HttpBackend;
//! use expense_client::services::api::ReqwestBackend;
//! use expense_client::config::ClientConfig;
//!
//! // In production: reqwest with a cookie store
//! let backend: Arc<dyn HttpBackend> = Arc::new(ReqwestBackend::new(&ClientConfig::default()).unwrap());
//! ```
//!
//! Unit tests use a scripted in-memory backend instead.

pub mod error;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ClientError, Result};
pub use service::{HttpBackend, HttpRequest, HttpResponse};
