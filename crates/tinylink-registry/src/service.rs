use crate::recorder::ClickRecorder;
use async_trait::async_trait;
use jiff::Timestamp;
use std::sync::Arc;
use tinylink_core::{
    CreateLinkParams, Link, LinkOverview, LinkRegistry, LinkStore, NewLink, RegistryError,
    ShortCode, StorageError,
};
use tinylink_generator::Generator;
use tracing::{debug, trace, warn};

/// Generated candidates tried before giving up with `GenerationExhausted`.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// A concrete implementation of the [`LinkRegistry`] trait.
///
/// This service wraps a [`LinkStore`] and a [`Generator`] to handle:
/// - Short code allocation (custom or auto-generated, with bounded retry)
/// - URL and custom code validation
/// - Click recording on resolve, through a [`ClickRecorder`]
///
/// Uniqueness is never checked up front: the store's atomic insert is the
/// only arbiter, and a conflict on a generated code triggers a new candidate.
#[derive(Debug)]
pub struct RegistryService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    recorder: ClickRecorder<S>,
    max_attempts: u32,
}

impl<S, G> Clone for RegistryService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            recorder: self.recorder.clone(),
            max_attempts: self.max_attempts,
        }
    }
}

impl<S: LinkStore, G: Generator> RegistryService<S, G> {
    /// Creates a new `RegistryService` with the default retry budget.
    pub fn new(store: S, generator: G) -> Self {
        let store = Arc::new(store);
        Self {
            recorder: ClickRecorder::new(Arc::clone(&store)),
            store,
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets how many generated candidates are tried per create (at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Any non-empty string is accepted and stored verbatim.
    fn validate_url(url: &str) -> Result<&str, RegistryError> {
        if url.is_empty() {
            return Err(RegistryError::InvalidInput("longUrl is required".to_string()));
        }
        Ok(url)
    }

    /// Codes that fail validation cannot be stored, so they are simply unknown.
    fn lookup_code(code: &str) -> Result<ShortCode, RegistryError> {
        ShortCode::new(code).map_err(|_| RegistryError::NotFound(code.to_string()))
    }

    async fn insert_custom(&self, long_url: &str, code: String) -> Result<Link, RegistryError> {
        let short_code = ShortCode::new(code)?;
        let link = self
            .store
            .insert(NewLink {
                short_code,
                long_url: long_url.to_string(),
                created_at: Timestamp::now(),
            })
            .await?;
        Ok(link)
    }

    async fn insert_generated(&self, long_url: &str) -> Result<Link, RegistryError> {
        for attempt in 1..=self.max_attempts {
            let short_code: ShortCode = self.generator.generate().into();
            let new_link = NewLink {
                short_code,
                long_url: long_url.to_string(),
                created_at: Timestamp::now(),
            };

            match self.store.insert(new_link).await {
                Ok(link) => return Ok(link),
                Err(StorageError::Conflict(code)) => {
                    warn!(code = %code, attempt, "generated short code already taken, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(RegistryError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[async_trait]
impl<S: LinkStore, G: Generator> LinkRegistry for RegistryService<S, G> {
    async fn create_link(&self, params: CreateLinkParams) -> Result<Link, RegistryError> {
        let long_url = Self::validate_url(&params.long_url)?;

        let link = match params.custom_code {
            Some(code) => self.insert_custom(long_url, code).await?,
            None => self.insert_generated(long_url).await?,
        };

        debug!(code = %link.short_code, id = %link.id, "created link");
        Ok(link)
    }

    async fn resolve(&self, code: &str) -> Result<String, RegistryError> {
        let code = Self::lookup_code(code)?;
        trace!(code = %code, "resolving short code");

        match self.recorder.record_click(&code).await {
            Ok(link) => Ok(link.long_url),
            Err(RegistryError::NotFound(missing)) => {
                trace!(code = %code, "short code not found");
                Err(RegistryError::NotFound(missing))
            }
            Err(err) => {
                // The redirect must not depend on analytics durability.
                warn!(code = %code, error = %err, "failed to record click, redirecting anyway");
                self.store
                    .find_by_code(&code)
                    .await?
                    .map(|link| link.long_url)
                    .ok_or_else(|| RegistryError::NotFound(code.to_string()))
            }
        }
    }

    async fn get_stats(&self, code: &str) -> Result<Link, RegistryError> {
        let code = Self::lookup_code(code)?;
        self.store
            .find_by_code(&code)
            .await?
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    async fn delete_link(&self, code: &str) -> Result<(), RegistryError> {
        let code = Self::lookup_code(code)?;
        if !self.store.delete(&code).await? {
            return Err(RegistryError::NotFound(code.to_string()));
        }

        debug!(code = %code, "deleted link");
        Ok(())
    }

    async fn list_links(&self) -> Result<Vec<LinkOverview>, RegistryError> {
        let links = self.store.list_all().await?;
        Ok(links.into_iter().map(LinkOverview::from).collect())
    }
}
