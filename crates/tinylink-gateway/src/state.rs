use std::sync::Arc;

use tinylink_core::LinkRegistry;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<dyn LinkRegistry>,
    base_url: String,
}

impl AppState {
    pub fn new(registry: Arc<dyn LinkRegistry>, public_base_url: impl Into<String>) -> Self {
        Self {
            registry,
            base_url: public_base_url.into(),
        }
    }

    pub fn registry(&self) -> &dyn LinkRegistry {
        self.registry.as_ref()
    }

    /// Base URL that short codes are appended to in responses.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
