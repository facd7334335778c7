use crate::error::GeneratorError;
use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinylink_core::shortcode::MAX_LENGTH;
use tinylink_core::ShortCode;

const MAX_PREFIX_LENGTH: usize = 2;

/// A short code generator using a sequential counter.
///
/// Produces codes like "tl000000", "tl000001", etc.: the prefix followed by
/// the counter zero-padded to 8 characters in total. The counter wraps
/// around within its digit width, so every output stays a valid code; a
/// wrapped code collides with an existing one and is retried by the registry.
///
/// For multiple nodes sharing one store, give each node its own prefix.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
    width: usize,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
            width: self.width,
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self, GeneratorError> {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state after a restart.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Result<Self, GeneratorError> {
        let prefix = prefix.into();
        if prefix.len() > MAX_PREFIX_LENGTH || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GeneratorError::InvalidPrefix(prefix));
        }

        Ok(Self {
            counter: AtomicU64::new(offset),
            width: MAX_LENGTH - prefix.len(),
            prefix,
        })
    }

    /// Creates a generator that continues after the highest code it would
    /// have produced among `existing`.
    ///
    /// Codes that don't carry this prefix followed by exactly the counter's
    /// digit width are ignored. Without any match the counter starts at 0.
    pub fn resume_after<'a, I>(prefix: impl Into<String>, existing: I) -> Result<Self, GeneratorError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut generator = Self::with_prefix(prefix)?;
        let next = existing
            .into_iter()
            .filter_map(|code| generator.counter_of(code))
            .max()
            .map_or(0, |last| last + 1);
        generator.counter = AtomicU64::new(next);
        Ok(generator)
    }

    /// The counter value `code` was generated from, if it is one of ours.
    fn counter_of(&self, code: &str) -> Option<u64> {
        let digits = code.strip_prefix(self.prefix.as_str())?;
        if digits.len() != self.width || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    fn modulus(&self) -> u64 {
        10_u64.pow(self.width as u32)
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst) % self.modulus();
        let code = format!("{}{:0width$}", self.prefix, count, width = self.width);
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("tl").unwrap();

        assert_eq!(generator.generate().as_str(), "tl000000");
        assert_eq!(generator.generate().as_str(), "tl000001");
        assert_eq!(generator.generate().as_str(), "tl000002");
    }

    #[test]
    fn empty_prefix_uses_all_digits() {
        let generator = SeqGenerator::with_prefix("").unwrap();

        assert_eq!(generator.generate().as_str(), "00000000");
    }

    #[test]
    fn with_offset() {
        let generator = SeqGenerator::with_offset("tl", 1000).unwrap();

        assert_eq!(generator.generate().as_str(), "tl001000");
        assert_eq!(generator.generate().as_str(), "tl001001");
    }

    #[test]
    fn counter_wraps_within_width() {
        let generator = SeqGenerator::with_offset("ab", 999_999).unwrap();

        assert_eq!(generator.generate().as_str(), "ab999999");
        assert_eq!(generator.generate().as_str(), "ab000000");
    }

    #[test]
    fn codes_are_valid() {
        let generator = SeqGenerator::with_offset("X", 42).unwrap();
        let code = generator.generate();

        assert_eq!(code.as_str(), "X0000042");
        assert!(ShortCode::new(code.as_str()).is_ok());
    }

    #[test]
    fn resume_after_continues_past_existing_codes() {
        let existing = ["tl000007", "tl000019", "abc123", "tl12", "tlABCDEF", "xy000500"];
        let generator = SeqGenerator::resume_after("tl", existing).unwrap();

        assert_eq!(generator.generate().as_str(), "tl000020");
        assert_eq!(generator.generate().as_str(), "tl000021");
    }

    #[test]
    fn resume_after_without_matches_starts_at_zero() {
        let generator = SeqGenerator::resume_after("tl", ["abc123", "xy000500"]).unwrap();
        assert_eq!(generator.generate().as_str(), "tl000000");

        let generator = SeqGenerator::resume_after("tl", std::iter::empty()).unwrap();
        assert_eq!(generator.generate().as_str(), "tl000000");
    }

    #[test]
    fn resume_after_rejects_invalid_prefix() {
        assert!(SeqGenerator::resume_after("abc", ["abc00000"]).is_err());
    }

    #[test]
    fn rejects_invalid_prefix() {
        assert!(matches!(
            SeqGenerator::with_prefix("abc"),
            Err(GeneratorError::InvalidPrefix(_))
        ));
        assert!(SeqGenerator::with_prefix("a-").is_err());
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("tl").unwrap();
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        assert_eq!(generator.generate().as_str(), "tl000002");
        assert_eq!(cloned.generate().as_str(), "tl000002");
    }
}
