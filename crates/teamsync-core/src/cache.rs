//! Process-lifetime memoization of the fetched group collection.
//!
//! One invocation may run several generation commands against the same
//! directory; the cache makes sure the directory is only paged through once.

use crate::directory::Group;
use crate::error::SyncResult;
use std::future::Future;
use tracing::debug;

/// Holds the last successfully fetched group collection
#[derive(Debug, Default)]
pub struct GroupCache {
    groups: Option<Vec<Group>>,
}

impl GroupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached groups, or run `fetch` and cache its result.
    ///
    /// A failed fetch leaves the cache empty so the next call retries. Once
    /// populated, the cache is returned as-is regardless of which backend
    /// the caller would fetch from.
    pub async fn get_or_fetch<F, Fut>(&mut self, fetch: F) -> SyncResult<&[Group]>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SyncResult<Vec<Group>>>,
    {
        if self.groups.is_some() {
            debug!("Using cached groups");
        } else {
            let groups = fetch().await?;
            self.groups = Some(groups);
        }

        Ok(self.groups.as_deref().unwrap_or_default())
    }

    pub fn is_populated(&self) -> bool {
        self.groups.is_some()
    }

    /// Drop the cached collection so the next call refetches
    pub fn invalidate(&mut self) {
        self.groups = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use std::cell::Cell;

    fn sample() -> Vec<Group> {
        vec![Group::new("Ops", "g1"), Group::new("Platform Engineering", "g2")]
    }

    #[tokio::test]
    async fn test_fetches_once() {
        let calls = Cell::new(0);
        let counter = &calls;
        let mut cache = GroupCache::new();

        let first = cache
            .get_or_fetch(move || async move {
                counter.set(counter.get() + 1);
                Ok(sample())
            })
            .await
            .unwrap()
            .to_vec();
        let second = cache
            .get_or_fetch(move || async move {
                counter.set(counter.get() + 1);
                Ok(vec![Group::new("Other", "g9")])
            })
            .await
            .unwrap()
            .to_vec();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(first, sample());
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let mut cache = GroupCache::new();

        let result = cache
            .get_or_fetch(|| async { Err(SyncError::Fetch("down".to_string())) })
            .await;
        assert!(result.is_err());
        assert!(!cache.is_populated());

        let groups = cache.get_or_fetch(|| async { Ok(sample()) }).await.unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_collection_is_cached() {
        let calls = Cell::new(0);
        let counter = &calls;
        let mut cache = GroupCache::new();

        for _ in 0..2 {
            cache
                .get_or_fetch(move || async move {
                    counter.set(counter.get() + 1);
                    Ok(Vec::new())
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let calls = Cell::new(0);
        let counter = &calls;
        let mut cache = GroupCache::new();
        let fetch = move || async move {
            counter.set(counter.get() + 1);
            Ok(sample())
        };

        cache.get_or_fetch(fetch).await.unwrap();
        cache.invalidate();
        assert!(!cache.is_populated());
        cache.get_or_fetch(fetch).await.unwrap();

        assert_eq!(calls.get(), 2);
    }
}
