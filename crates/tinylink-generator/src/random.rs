use crate::error::GeneratorError;
use crate::Generator;
use rand::Rng;
use tinylink_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use tinylink_core::ShortCode;
use typed_builder::TypedBuilder;

/// The 62 symbols a short code is drawn from.
const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomGeneratorSettings {
    #[builder(default = MIN_LENGTH)]
    min_len: usize,
    #[builder(default = MAX_LENGTH)]
    max_len: usize,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Generates codes of uniformly random length and symbols.
///
/// Each call draws a length from `min_len..=max_len`, then each symbol
/// independently from `[A-Za-z0-9]` using the thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    min_len: usize,
    max_len: usize,
}

impl RandomGenerator {
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, GeneratorError> {
        let RandomGeneratorSettings { min_len, max_len } = settings;
        if min_len < MIN_LENGTH || max_len > MAX_LENGTH || min_len > max_len {
            return Err(GeneratorError::InvalidLength { min_len, max_len });
        }
        Ok(Self { min_len, max_len })
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            min_len: MIN_LENGTH,
            max_len: MAX_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let mut rng = rand::rng();
        let len = rng.random_range(self.min_len..=self.max_len);
        let code: String = (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn alphabet_has_62_unique_symbols() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
        assert!(ALPHABET.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_codes_are_valid_short_codes() {
        let generator = RandomGenerator::default();

        for _ in 0..1_000 {
            let code = generator.generate();
            assert!(
                ShortCode::new(code.as_str()).is_ok(),
                "invalid code generated: {code}"
            );
        }
    }

    #[test]
    fn generated_lengths_cover_the_whole_range() {
        let generator = RandomGenerator::default();
        let lengths: HashSet<usize> = (0..1_000).map(|_| generator.generate().as_str().len()).collect();

        assert_eq!(lengths, HashSet::from([6, 7, 8]));
    }

    #[test]
    fn fixed_length_settings() {
        let settings = RandomGeneratorSettings::builder().min_len(7).max_len(7).build();
        let generator = RandomGenerator::new(settings).unwrap();
        assert_eq!((generator.min_len(), generator.max_len()), (7, 7));

        for _ in 0..100 {
            assert_eq!(generator.generate().as_str().len(), 7);
        }
    }

    #[test]
    fn rejects_out_of_range_settings() {
        let too_short = RandomGeneratorSettings::builder().min_len(5).build();
        assert_eq!(
            RandomGenerator::new(too_short).unwrap_err(),
            GeneratorError::InvalidLength {
                min_len: 5,
                max_len: 8
            }
        );

        let too_long = RandomGeneratorSettings::builder().max_len(9).build();
        assert!(RandomGenerator::new(too_long).is_err());

        let inverted = RandomGeneratorSettings::builder().min_len(8).max_len(6).build();
        assert!(RandomGenerator::new(inverted).is_err());
    }

    #[test]
    fn consecutive_codes_differ() {
        let generator = RandomGenerator::default();
        let codes: HashSet<String> = (0..100).map(|_| generator.generate().to_string()).collect();
        assert!(codes.len() > 95);
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
