use thiserror::Error;

/// Errors returned when configuring a generator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid code length range {min_len}..={max_len}; expected within 6..=8")]
    InvalidLength { min_len: usize, max_len: usize },
    #[error("invalid prefix '{0}'; expected at most 2 alphanumeric characters")]
    InvalidPrefix(String),
}
