use crate::error::StorageError;
use crate::link::{Link, NewLink};
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a link store.
#[async_trait]
pub trait ReadLinkStore: Send + Sync + 'static {
    /// Retrieves the link for a given short code.
    /// Returns `None` if the code does not exist.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<Link>>;

    /// Returns every link, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<Link>>;
}

/// Durable storage of links.
///
/// Conflict detection on insert and the click increment must each be a
/// single atomic operation of the backend.
#[async_trait]
pub trait LinkStore: ReadLinkStore {
    /// Inserts a new link. Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, link: NewLink) -> Result<Link>;

    /// Appends `at` to the click history and increments the click count.
    /// Returns the updated link, or `None` if the code does not exist.
    async fn increment_click(&self, code: &ShortCode, at: Timestamp) -> Result<Option<Link>>;

    /// Deletes the link for a given short code.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;
}
