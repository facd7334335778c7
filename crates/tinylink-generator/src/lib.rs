pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::{RandomGenerator, RandomGeneratorSettings};
pub use seq::SeqGenerator;

use tinylink_core::ShortCode;

/// Trait for generating candidate short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A candidate may collide with an existing code; the registry is
/// responsible for enforcing uniqueness through the store.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Produces the next candidate short code.
    fn generate(&self) -> Self::Output;
}

impl<G: Generator> Generator for std::sync::Arc<G> {
    type Output = G::Output;

    fn generate(&self) -> Self::Output {
        (**self).generate()
    }
}
