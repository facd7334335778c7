pub mod memory;
pub mod postgres;

pub use memory::InMemoryLinkStore;
pub use postgres::{PostgresLinkStore, PostgresOptions};
pub use tinylink_core::error::StorageError;
pub use tinylink_core::store::{LinkStore, ReadLinkStore, Result};
