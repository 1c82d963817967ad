use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::session::SessionError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(#[from] SessionError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedPayload | AppError::MissingCredentials => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Catalog(CatalogError::Status { status, .. }) if status.is_client_error() => {
                StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Catalog(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!("{self}");
        }

        let body = json!({ "success": false, "message": self.to_string() });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::MalformedPayload, StatusCode::BAD_REQUEST),
            (AppError::MissingCredentials, StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::Unauthorized(SessionError::Expired), StatusCode::UNAUTHORIZED),
            (
                AppError::Catalog(CatalogError::Unavailable("leksikon 9".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Catalog(CatalogError::Status {
                    status: catalog::error::StatusCode::NOT_FOUND,
                    path: "leksikons/9".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_session_messages() {
        assert_eq!(
            AppError::from(SessionError::Missing).to_string(),
            "Unauthorized - No token provided"
        );
        assert_eq!(AppError::from(SessionError::Malformed).to_string(), "Invalid token format");
    }
}
