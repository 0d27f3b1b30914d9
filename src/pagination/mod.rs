//! Pagination module
//!
//! Supports: query sources (count + bounded fetch) and in-memory collections
//!
//! # Overview
//!
//! A [`Paginator`] is built from a [`QuerySource`] or from records already in
//! memory. The current page comes from the request's query string, falling
//! back to the configured default. The paginator serializes to a JSON
//! envelope carrying the page's records, totals, and navigation links.
//!
//! ```rust,ignore
//! use solidafy_paginator::{CollectionSource, PageRequest, Paginate, PaginatorConfig};
//!
//! let source = CollectionSource::new(users);
//! let request = PageRequest::from_uri("/users?page=2&sort=name")?;
//! let page = source.paginate(&PaginatorConfig::new(10), &request).await?;
//! let body = page.to_json()?;
//! ```

mod links;
mod paginator;
mod source;
mod types;

pub use links::page_url;
pub use paginator::Paginator;
pub use source::{CollectionSource, Paginate, PaginateCollection, QuerySource};
pub use types::{last_page, resolve_page, PageWindow};
