use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tinylink_core::RegistryError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request body could not be parsed.
    BadRequest(String),
    Registry(RegistryError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Registry(err) => match err {
                RegistryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                RegistryError::CodeConflict(_) => StatusCode::CONFLICT,
                RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
                RegistryError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                RegistryError::GenerationExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(message) => message.clone(),
            AppError::Registry(RegistryError::InvalidInput(message)) => message.clone(),
            AppError::Registry(RegistryError::CodeConflict(_)) => "Code already exists".to_string(),
            AppError::Registry(RegistryError::NotFound(_)) => "Link not found".to_string(),
            AppError::Registry(_) => "Server error".to_string(),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        AppError::Registry(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        AppError::BadRequest(value.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_map_to_status_codes() {
        let cases = [
            (RegistryError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (RegistryError::CodeConflict("abc123".into()), StatusCode::CONFLICT),
            (RegistryError::NotFound("abc123".into()), StatusCode::NOT_FOUND),
            (
                RegistryError::StorageUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                RegistryError::GenerationExhausted { attempts: 10 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).into_response().status(), expected);
        }
    }

    #[test]
    fn server_errors_hide_details() {
        let err = AppError::from(RegistryError::StorageUnavailable("password=hunter2".into()));
        assert_eq!(err.message(), "Server error");
    }
}
