//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use jeton_core::error::{AppError, ErrorKind};
use jeton_core::types::response::ApiErrorResponse;

/// Wrapper carrying an [`AppError`] across the handler boundary.
///
/// Handlers return `Result<_, ApiError>` so `?` converts domain errors
/// automatically; the wrapper exists only to host the `IntoResponse` impl.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::InvalidCredentials | ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Validation | ErrorKind::IncompletePrerequisites => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Server faults keep their detail in the logs, not the response.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "Internal server error");
            "Internal server error".to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AppError::invalid_credentials()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::unauthenticated("no session")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::forbidden("nope")), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(AppError::incomplete_prerequisites("steps missing")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::validation("bad input")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::not_found("gone")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::database("down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
