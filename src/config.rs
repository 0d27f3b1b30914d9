//! Paginator configuration
//!
//! A single explicit value replaces the long list of optional arguments a
//! paginator needs. Configs can be built in code or loaded from YAML.
//!
//! ```yaml
//! per_page: 25
//! default_page: 1
//! page_name: page
//! data_key: data
//! collection_mode: slice
//! ```

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Keys the serialized envelope already uses; a data key may not shadow them
pub const RESERVED_KEYS: &[&str] = &[
    "total",
    "per_page",
    "current_page",
    "last_page",
    "from",
    "to",
    "first_page_url",
    "last_page_url",
    "next_page_url",
    "prev_page_url",
];

// ============================================================================
// Collection Mode
// ============================================================================

/// How a paginator built from an in-memory collection selects its records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionMode {
    /// Keep only the records inside the current page window
    #[default]
    Slice,
    /// Emit the whole collection as the page data, reporting the full total
    Passthrough,
}

// ============================================================================
// Paginator Config
// ============================================================================

/// Pagination parameters shared by every paginator constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorConfig {
    /// Number of records per page
    pub per_page: u64,

    /// Page used when the request carries no usable page value
    #[serde(default = "default_page")]
    pub default_page: u64,

    /// Query string key holding the page number
    #[serde(default = "default_page_name")]
    pub page_name: String,

    /// Envelope key the page's records are emitted under
    #[serde(default = "default_data_key")]
    pub data_key: String,

    /// Slicing policy for in-memory collections
    #[serde(default)]
    pub collection_mode: CollectionMode,
}

fn default_page() -> u64 {
    1
}

fn default_page_name() -> String {
    "page".to_string()
}

fn default_data_key() -> String {
    "data".to_string()
}

impl PaginatorConfig {
    /// Create a config with the given page size and default everything else
    pub fn new(per_page: u64) -> Self {
        Self {
            per_page,
            default_page: default_page(),
            page_name: default_page_name(),
            data_key: default_data_key(),
            collection_mode: CollectionMode::default(),
        }
    }

    /// Set the page used when the request has none
    #[must_use]
    pub fn with_default_page(mut self, page: u64) -> Self {
        self.default_page = page;
        self
    }

    /// Set the query string key for the page number
    #[must_use]
    pub fn with_page_name(mut self, name: impl Into<String>) -> Self {
        self.page_name = name.into();
        self
    }

    /// Set the envelope key for the page's records
    #[must_use]
    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = key.into();
        self
    }

    /// Set the in-memory collection policy
    #[must_use]
    pub fn with_collection_mode(mut self, mode: CollectionMode) -> Self {
        self.collection_mode = mode;
        self
    }

    /// Load a config from a YAML string and validate it
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file and validate it
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Check every field against the paginator invariants
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(Error::invalid_config("per_page", "must be at least 1"));
        }

        if self.default_page == 0 {
            return Err(Error::invalid_config("default_page", "must be at least 1"));
        }

        if self.page_name.trim().is_empty() {
            return Err(Error::invalid_config("page_name", "cannot be empty"));
        }

        if self.data_key.trim().is_empty() {
            return Err(Error::invalid_config("data_key", "cannot be empty"));
        }

        if RESERVED_KEYS.contains(&self.data_key.as_str()) {
            return Err(Error::invalid_config(
                "data_key",
                format!("'{}' is reserved by the pagination envelope", self.data_key),
            ));
        }

        Ok(())
    }
}
