use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::atomic::{AtomicI64, Ordering};
use tinylink_core::error::StorageError;
use tinylink_core::store::{LinkStore, ReadLinkStore, Result};
use tinylink_core::{Link, LinkId, NewLink, ShortCode};
use tracing::trace;

/// In-memory implementation of the link store using DashMap.
///
/// DashMap shards its locks, so operations on unrelated codes don't contend.
/// Every mutation goes through a single shard guard: the entry API makes
/// check-and-insert atomic, and `get_mut` holds the write lock for the whole
/// click append.
#[derive(Debug)]
pub struct InMemoryLinkStore {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: DashMap::with_capacity(capacity),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Default for InMemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadLinkStore for InMemoryLinkStore {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<Link>> {
        Ok(self.links.get(code.as_str()).map(|entry| entry.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Link>> {
        let mut links: Vec<Link> = self.links.iter().map(|entry| entry.value().clone()).collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(links)
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert(&self, link: NewLink) -> Result<Link> {
        match self.links.entry(link.short_code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(link.short_code.to_string())),
            Entry::Vacant(vacant) => {
                let id = LinkId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
                let link = Link::from_new(id, link);
                trace!(code = %link.short_code, id = %id, "inserted link");
                Ok(vacant.insert(link).clone())
            }
        }
    }

    async fn increment_click(&self, code: &ShortCode, at: Timestamp) -> Result<Option<Link>> {
        let Some(mut entry) = self.links.get_mut(code.as_str()) else {
            return Ok(None);
        };

        entry.append_click(at);
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.links.remove(code.as_str()).is_some())
    }
}
