//! Query sources
//!
//! A query source is anything that can count its records and fetch an
//! ordered, bounded window of them. The paginator calls each operation at
//! most once per construction.

use super::paginator::Paginator;
use crate::config::PaginatorConfig;
use crate::error::Result;
use crate::request::PageRequest;
use async_trait::async_trait;

/// Count and bounded fetch over some data store
#[async_trait]
pub trait QuerySource: Send + Sync {
    /// Record type produced by [`fetch`](Self::fetch)
    type Record: Send;

    /// Count every record the query matches, ignoring pagination
    async fn count(&self) -> Result<u64>;

    /// Fetch records `[offset, offset + limit)` in the query's declared order
    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<Self::Record>>;
}

/// In-memory records exposed as a query source
///
/// Records are returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CollectionSource<T> {
    records: Vec<T>,
}

impl<T> CollectionSource<T> {
    /// Wrap a vector of records
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the source holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> FromIterator<T> for CollectionSource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl<T> QuerySource for CollectionSource<T>
where
    T: Clone + Send + Sync,
{
    type Record = T;

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }

    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<T>> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .records
            .iter()
            .skip(start)
            .take(take)
            .cloned()
            .collect())
    }
}

/// `source.paginate(...)` for every query source
#[async_trait]
pub trait Paginate: QuerySource + Sized {
    /// Build a paginator over this source for the given request
    async fn paginate(
        &self,
        config: &PaginatorConfig,
        request: &PageRequest,
    ) -> Result<Paginator<Self::Record>>;
}

#[async_trait]
impl<Q: QuerySource> Paginate for Q {
    async fn paginate(
        &self,
        config: &PaginatorConfig,
        request: &PageRequest,
    ) -> Result<Paginator<Q::Record>> {
        Paginator::from_query(self, config, request).await
    }
}

/// `records.paginate_collection(...)` for every already-fetched collection
pub trait PaginateCollection: IntoIterator + Sized {
    /// Build a paginator over these records for the given request
    fn paginate_collection(
        self,
        config: &PaginatorConfig,
        request: &PageRequest,
    ) -> Result<Paginator<Self::Item>>;
}

impl<I: IntoIterator> PaginateCollection for I {
    fn paginate_collection(
        self,
        config: &PaginatorConfig,
        request: &PageRequest,
    ) -> Result<Paginator<I::Item>> {
        Paginator::from_collection(self, config, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn test_collection_source_count() {
        let source: CollectionSource<u32> = (1..=7).collect();
        assert_eq!(source.len(), 7);
        assert!(!source.is_empty());
        assert_eq!(block_on(source.count()).unwrap(), 7);
    }

    #[test]
    fn test_collection_source_fetch_window() {
        let source = CollectionSource::new(vec!['a', 'b', 'c', 'd', 'e']);
        assert_eq!(block_on(source.fetch(1, 2)).unwrap(), vec!['b', 'c']);
        assert_eq!(block_on(source.fetch(4, 10)).unwrap(), vec!['e']);
        assert!(block_on(source.fetch(5, 10)).unwrap().is_empty());
        assert!(block_on(source.fetch(u64::MAX, u64::MAX)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_collection_source() {
        let source = CollectionSource::<String>::default();
        assert!(source.is_empty());
        assert_eq!(block_on(source.count()).unwrap(), 0);
    }
}
