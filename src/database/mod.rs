//! Database query sources via DuckDB
//!
//! This module provides a [`QuerySource`](crate::pagination::QuerySource)
//! backed by DuckDB. DuckDB can also attach PostgreSQL, MySQL, and SQLite
//! databases, so one source type covers all of them.

mod source;

pub use source::DuckDbSource;
