//! Link registry service.
//!
//! [`RegistryService`] allocates short codes (custom or generated), resolves
//! them and records clicks through the [`ClickRecorder`]. It implements the
//! [`LinkRegistry`](tinylink_core::LinkRegistry) contract the HTTP layer
//! consumes.

pub mod recorder;
pub mod service;

pub use recorder::ClickRecorder;
pub use service::{RegistryService, DEFAULT_MAX_ATTEMPTS};
