use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Faults a request can end in. `Configuration` and `Store` are the two
/// storage fault kinds; the remaining variants are local validation
/// outcomes that never reach the store.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The store credential is unset or unusable at client-construction
    /// time. Always rendered with a fixed message; the cause is logged,
    /// never returned to the caller.
    #[error("Storage not configured")]
    Configuration,
    #[error("Filename is required")]
    MissingFilename,
    #[error("File not found")]
    NotFound,
    /// Any fault raised by the blob store itself. The message is passed
    /// through verbatim.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Configuration | GatewayError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::MissingFilename => StatusCode::BAD_REQUEST,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
        };

        if let GatewayError::Store(err) = &self {
            tracing::error!("storage error: {err:#}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::Configuration.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::MissingFilename.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::Store(anyhow::anyhow!("connection reset"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
