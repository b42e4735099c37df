use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => Self::new(message, StatusCode::BAD_REQUEST),
            e @ DomainError::NotFound { .. } => Self::new(e.to_string(), StatusCode::NOT_FOUND),
            e @ DomainError::InvalidCredentials => Self::new(e.to_string(), StatusCode::UNAUTHORIZED),
            DomainError::Storage(e) => {
                error!("Storage error: {:#}", e);
                Self::new("Error interno del servidor", StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Solicitud inválida: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(format!("Parámetros inválidos: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(format!("Ruta inválida: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("ApiError: {} (HTTP {})", self.message, self.status.as_u16());
        let body = ErrorResponse {
            message: self.message,
            status: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::validation("date is required"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("Appointment", 4), StatusCode::NOT_FOUND),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                DomainError::Storage(anyhow::anyhow!("disk I/O error")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (domain_error, expected) in cases {
            assert_eq!(ApiError::from(domain_error).status, expected);
        }
    }

    #[test]
    fn test_storage_details_are_not_exposed() {
        let api_error = ApiError::from(DomainError::Storage(anyhow::anyhow!("no such table: users")));
        assert!(!api_error.message.contains("users"));
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let response = ApiError::bad_request("Invalid month").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, "Invalid month");
        assert_eq!(body.status, 400);
    }
}
