//! # Solidafy Paginator
//!
//! Page-number pagination for web handlers, layered over any query source.
//!
//! ## Features
//!
//! - **Query Sources**: paginate anything that can `count` and `fetch(offset, limit)`
//! - **In-Memory Collections**: paginate records that were already fetched
//! - **Lenient Page Parsing**: bad `?page=` values fall back to the default page
//! - **Page Links**: next/previous/first/last URLs that keep the other query parameters
//! - **JSON Envelopes**: `total`, `per_page`, `current_page`, `last_page`, links and data
//! - **DuckDB**: ready-made source for SQL queries (and attached Postgres/MySQL/SQLite)
//! - **axum**: `PageRequest` extractor and `IntoResponse` for paginators
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_paginator::{DuckDbSource, PageRequest, Paginate, PaginatorConfig};
//!
//! let source = DuckDbSource::open("app.duckdb", "SELECT * FROM users")?.with_order_by("id");
//! let request = PageRequest::from_uri("/users?page=2&sort=name")?;
//!
//! let page = source.paginate(&PaginatorConfig::new(25), &request).await?;
//! println!("{}", page.to_json()?);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌─────────────────────────┐
//! │ PageRequest  │──▶│    Paginator     │──▶│ JSON envelope / axum     │
//! │ base + query │   │ count + fetch    │   │ response                 │
//! └──────────────┘   └────────┬─────────┘   └─────────────────────────┘
//!                             │
//!              ┌──────────────┴──────────────┐
//!              │ QuerySource                 │
//!              │ CollectionSource │ DuckDb   │
//!              └─────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document Paginator accessors and error fields before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Paginator configuration and YAML loading
pub mod config;

/// Request context (base URI + query string)
pub mod request;

/// Paginator, page windows, query sources
pub mod pagination;

/// DuckDB query source
pub mod database;

/// axum extractor and responses
pub mod web;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{CollectionMode, PaginatorConfig};
pub use database::DuckDbSource;
pub use error::{Error, QueryOperation, Result, ResultExt};
pub use pagination::{
    CollectionSource, PageWindow, Paginate, PaginateCollection, Paginator, QuerySource,
};
pub use request::PageRequest;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
