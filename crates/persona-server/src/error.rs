use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use persona_ai::{ErrorKind, GatewayError};
use persona_common::SessionId;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            ApiError::InvalidBody(rejection) => (rejection.status(), "INVALID_BODY"),
            ApiError::Gateway(e) => match e.kind() {
                ErrorKind::GatewayUnavailable => (StatusCode::BAD_GATEWAY, "GATEWAY_UNAVAILABLE"),
                ErrorKind::ProviderRejected => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "PROVIDER_REJECTED")
                }
            },
        };

        if let ApiError::Gateway(e) = &self {
            tracing::warn!(error = %e, "Gateway call failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code,
        };

        (status, Json(body)).into_response()
    }
}
