//! Core types and traits for the TinyLink URL shortener.
//!
//! This crate provides the domain types shared by the generator, the
//! storage backends, the registry service and the HTTP gateway.

pub mod error;
pub mod link;
pub mod registry;
pub mod shortcode;
pub mod store;

pub use error::{CoreError, RegistryError, StorageError};
pub use link::{Link, LinkId, LinkOverview, NewLink};
pub use registry::{CreateLinkParams, LinkRegistry};
pub use shortcode::ShortCode;
pub use store::{LinkStore, ReadLinkStore};
