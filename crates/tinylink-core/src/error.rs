use thiserror::Error;

/// Errors related to the core domain types.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors raised by a [`LinkStore`](crate::store::LinkStore) backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Outcomes of the [`LinkRegistry`](crate::registry::LinkRegistry) operations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Malformed long URL or custom code. The client must fix the request.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The requested custom code is already taken.
    #[error("short code already exists: {0}")]
    CodeConflict(String),
    /// Every generated candidate collided with an existing code.
    #[error("could not allocate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("link not found: {0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<CoreError> for RegistryError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidInput(message),
        }
    }
}

impl From<StorageError> for RegistryError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(code) => Self::CodeConflict(code),
            other => Self::StorageUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_conflict_maps_to_code_conflict() {
        let err = RegistryError::from(StorageError::Conflict("abc123".to_string()));
        assert!(matches!(err, RegistryError::CodeConflict(code) if code == "abc123"));
    }

    #[test]
    fn other_storage_errors_map_to_unavailable() {
        let err = RegistryError::from(StorageError::Timeout("pool timed out".to_string()));
        match err {
            RegistryError::StorageUnavailable(message) => {
                assert!(message.contains("pool timed out"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_short_code_maps_to_invalid_input() {
        let err = RegistryError::from(CoreError::InvalidShortCode("too short".to_string()));
        assert!(matches!(err, RegistryError::InvalidInput(_)));
    }
}
