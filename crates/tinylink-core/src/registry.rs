use crate::link::{Link, LinkOverview};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::RegistryError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct CreateLinkParams {
    /// The target URL to be shortened.
    pub long_url: String,
    /// Optional caller-supplied short code. Validated by the registry.
    pub custom_code: Option<String>,
}

impl CreateLinkParams {
    /// Parameters for an auto-generated short code.
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            custom_code: None,
        }
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }
}

/// Operations the HTTP layer consumes.
#[async_trait]
pub trait LinkRegistry: Send + Sync + 'static {
    /// Allocates a short code (custom or generated) and persists the link.
    async fn create_link(&self, params: CreateLinkParams) -> Result<Link>;

    /// Resolves a short code to its long URL and records a click.
    async fn resolve(&self, code: &str) -> Result<String>;

    /// Returns the link together with its click history.
    async fn get_stats(&self, code: &str) -> Result<Link>;

    /// Deletes a link and its click history.
    async fn delete_link(&self, code: &str) -> Result<()>;

    /// Lists every link, newest first.
    async fn list_links(&self) -> Result<Vec<LinkOverview>>;
}
