//! The paginator
//!
//! A [`Paginator`] bundles one page of records with everything a client needs
//! to navigate the full result set. It is built once per request, never
//! mutated, and serialized into the response body.

use super::links::page_url;
use super::source::QuerySource;
use super::types::{last_page, resolve_page, PageWindow};
use crate::config::{CollectionMode, PaginatorConfig};
use crate::error::Result;
use crate::request::PageRequest;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// One page of records plus pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator<T> {
    per_page: u64,
    current_page: u64,
    page_name: String,
    data_key: String,
    total: u64,
    data: Vec<T>,
    /// 0-based position of `data[0]` in the full result set
    first_index: u64,
    base_uri: String,
    uri_queries: Vec<(String, String)>,
}

impl<T> Paginator<T> {
    /// Build a paginator by counting and fetching from a query source
    ///
    /// Runs exactly one `count` followed by one `fetch`. The fetch runs even
    /// when the requested page lies past the last page, yielding an empty
    /// page. Source errors are returned unchanged.
    pub async fn from_query<Q>(
        source: &Q,
        config: &PaginatorConfig,
        request: &PageRequest,
    ) -> Result<Self>
    where
        Q: QuerySource<Record = T> + ?Sized,
    {
        config.validate()?;

        let current_page = resolve_page(config, request);
        let total = source.count().await?;
        let window = PageWindow::new(current_page, config.per_page);

        tracing::debug!(
            "Fetching page {} (offset {}, limit {}) of {} records",
            window.page,
            window.offset,
            window.limit,
            total
        );

        let data = source.fetch(window.offset, window.limit).await?;

        Ok(Self::assemble(config, request, window, total, data))
    }

    /// Build a paginator over records that are already in memory
    ///
    /// `total` is always the full collection length. Which records land in
    /// `data` follows [`CollectionMode`]. Records are kept as-is, so a record
    /// that can't be serialized only fails once the paginator is serialized.
    /// Use [`Paginator::from_collection_json`] to fail here instead.
    pub fn from_collection<I>(
        items: I,
        config: &PaginatorConfig,
        request: &PageRequest,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        config.validate()?;

        let current_page = resolve_page(config, request);
        let window = PageWindow::new(current_page, config.per_page);
        let records: Vec<T> = items.into_iter().collect();
        let total = records.len() as u64;

        let (data, first_index) = match config.collection_mode {
            CollectionMode::Slice => {
                let skip = usize::try_from(window.offset).unwrap_or(usize::MAX);
                let take = usize::try_from(window.limit).unwrap_or(usize::MAX);
                let data = records.into_iter().skip(skip).take(take).collect();
                (data, window.offset)
            }
            CollectionMode::Passthrough => (records, 0),
        };

        let mut paginator = Self::assemble(config, request, window, total, data);
        paginator.first_index = first_index;

        tracing::debug!(
            "Paginated {} in-memory records: page {} holds {}",
            total,
            paginator.current_page,
            paginator.data.len()
        );

        Ok(paginator)
    }

    fn assemble(
        config: &PaginatorConfig,
        request: &PageRequest,
        window: PageWindow,
        total: u64,
        data: Vec<T>,
    ) -> Self {
        Self {
            per_page: config.per_page,
            current_page: window.page,
            page_name: config.page_name.clone(),
            data_key: config.data_key.clone(),
            total,
            data,
            first_index: window.offset,
            base_uri: request.base_uri.clone(),
            uri_queries: request.query.clone(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn page_name(&self) -> &str {
        &self.page_name
    }

    pub fn data_key(&self) -> &str {
        &self.data_key
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn uri_queries(&self) -> &[(String, String)] {
        &self.uri_queries
    }

    /// Total number of pages, 0 when there are no records
    pub fn last_page(&self) -> u64 {
        last_page(self.total, self.per_page)
    }

    /// Offset/limit window of the current page
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.current_page, self.per_page)
    }

    /// 1-based index of the first record on this page
    pub fn first_item(&self) -> Option<u64> {
        (!self.data.is_empty()).then(|| self.first_index + 1)
    }

    /// 1-based index of the last record on this page
    pub fn last_item(&self) -> Option<u64> {
        (!self.data.is_empty()).then(|| self.first_index + self.data.len() as u64)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn on_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// Check whether a page follows this one
    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page()
    }

    // ========================================================================
    // Links
    // ========================================================================

    /// Link to an arbitrary page, keeping the request's other query parameters
    pub fn url_for_page(&self, page: u64) -> String {
        page_url(&self.base_uri, &self.uri_queries, &self.page_name, page)
    }

    pub fn first_page_url(&self) -> String {
        self.url_for_page(1)
    }

    pub fn last_page_url(&self) -> Option<String> {
        match self.last_page() {
            0 => None,
            last => Some(self.url_for_page(last)),
        }
    }

    pub fn next_page_url(&self) -> Option<String> {
        self.has_more_pages()
            .then(|| self.url_for_page(self.current_page + 1))
    }

    pub fn prev_page_url(&self) -> Option<String> {
        (self.current_page > 1).then(|| self.url_for_page(self.current_page - 1))
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convert every record, keeping the pagination metadata
    pub fn map<U, F>(self, f: F) -> Paginator<U>
    where
        F: FnMut(T) -> U,
    {
        Paginator {
            per_page: self.per_page,
            current_page: self.current_page,
            page_name: self.page_name,
            data_key: self.data_key,
            total: self.total,
            data: self.data.into_iter().map(f).collect(),
            first_index: self.first_index,
            base_uri: self.base_uri,
            uri_queries: self.uri_queries,
        }
    }
}

impl<T: Serialize> Paginator<T> {
    /// Serialize the full envelope to a JSON value
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Convert every record to JSON, failing on the first record that can't be
    pub fn try_into_json(self) -> Result<Paginator<Value>> {
        let data = self
            .data
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Paginator {
            per_page: self.per_page,
            current_page: self.current_page,
            page_name: self.page_name,
            data_key: self.data_key,
            total: self.total,
            data,
            first_index: self.first_index,
            base_uri: self.base_uri,
            uri_queries: self.uri_queries,
        })
    }
}

impl Paginator<Value> {
    /// Build a paginator over in-memory records, converting the page's
    /// records to JSON immediately
    ///
    /// Fails with [`Error::Serialization`](crate::Error::Serialization) on the
    /// first record in `data` that can't be converted.
    pub fn from_collection_json<I, R>(
        items: I,
        config: &PaginatorConfig,
        request: &PageRequest,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Serialize,
    {
        Paginator::from_collection(items, config, request)?.try_into_json()
    }
}

impl<T: Serialize> Serialize for Paginator<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(11))?;
        map.serialize_entry("total", &self.total)?;
        map.serialize_entry("per_page", &self.per_page)?;
        map.serialize_entry("current_page", &self.current_page)?;
        map.serialize_entry("last_page", &self.last_page())?;
        map.serialize_entry("from", &self.first_item())?;
        map.serialize_entry("to", &self.last_item())?;
        map.serialize_entry("first_page_url", &self.first_page_url())?;
        map.serialize_entry("last_page_url", &self.last_page_url())?;
        map.serialize_entry("next_page_url", &self.next_page_url())?;
        map.serialize_entry("prev_page_url", &self.prev_page_url())?;
        map.serialize_entry(&self.data_key, &self.data)?;
        map.end()
    }
}
