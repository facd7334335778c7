use jiff::Timestamp;
use std::sync::Arc;
use tinylink_core::{Link, LinkStore, RegistryError, ShortCode};
use tracing::trace;

/// Appends click events to a link's history.
///
/// The append is delegated to [`LinkStore::increment_click`], which is
/// atomic per record, so the recorder can be shared by any number of
/// concurrent redirects.
#[derive(Debug)]
pub struct ClickRecorder<S> {
    store: Arc<S>,
}

impl<S> Clone for ClickRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LinkStore> ClickRecorder<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Records a click happening now.
    pub async fn record_click(&self, code: &ShortCode) -> Result<Link, RegistryError> {
        self.record_click_at(code, Timestamp::now()).await
    }

    /// Records a click at `at` and returns the updated link.
    pub async fn record_click_at(
        &self,
        code: &ShortCode,
        at: Timestamp,
    ) -> Result<Link, RegistryError> {
        match self.store.increment_click(code, at).await? {
            Some(link) => {
                trace!(code = %code, clicks = link.click_count, "recorded click");
                Ok(link)
            }
            None => Err(RegistryError::NotFound(code.to_string())),
        }
    }
}
