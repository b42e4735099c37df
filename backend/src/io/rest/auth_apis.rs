//! # REST API for Login
//!
//! `/api/auth/login` checks the users table; `/api/login` is the stub that
//! accepts any non-empty credentials.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::info;

use crate::domain::AuthService;
use crate::io::rest::error::ApiResult;
use crate::io::rest::extract::ApiJson;
use crate::AppState;
use shared::{LoginRequest, MockLoginRequest};

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Liveness check
pub async fn status() -> &'static str {
    info!("GET /api/status");
    "FMSS API is running"
}

async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    // Never log the password
    info!("POST /api/auth/login - username: {}", request.username);

    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}

/// Stub login; an empty or unreadable body counts as missing credentials
pub async fn mock_login(body: Bytes) -> impl IntoResponse {
    let request: MockLoginRequest = serde_json::from_slice(&body).unwrap_or_default();
    info!("POST /api/login - email: {:?}", request.email);

    let response = AuthService::mock_login(&request);
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use crate::domain::models::user::User;
    use crate::io::rest::test_support::{json_request, read_json, test_app};
    use crate::storage::{UserRepository, UserStorage};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use shared::{ErrorResponse, LoginRequest, LoginResponse, MockLoginRequest, MockLoginResponse};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_status() -> Result<(), Box<dyn std::error::Error>> {
        let (app, _) = test_app().await?;

        let response = app
            .oneshot(Request::builder().uri("/api/status").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], b"FMSS API is running");

        Ok(())
    }

    #[tokio::test]
    async fn test_login() -> Result<(), Box<dyn std::error::Error>> {
        let db = crate::storage::DbConnection::init_test().await?;
        UserRepository::new(db.clone())
            .store_user(&User {
                id: 0,
                name: "admin".to_string(),
                email: Some("admin@fmss.mx".to_string()),
                password: "admin123".to_string(),
                role: "admin".to_string(),
            })
            .await?;
        let (app, _) = crate::io::rest::test_support::test_app_with_db(db);

        let body = LoginRequest {
            username: "Admin@FMSS.mx".to_string(),
            password: "admin123".to_string(),
        };
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/auth/login", &body)?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let login: LoginResponse = read_json(response).await?;
        assert_eq!(login.user.name, "admin");
        assert_eq!(login.user.role, "admin");

        let body = LoginRequest {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        };
        let response = app
            .oneshot(json_request(Method::POST, "/api/auth/login", &body)?)
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let error: ErrorResponse = read_json(response).await?;
        assert_eq!(error.message, "Usuario o contraseña incorrectos.");
        assert_eq!(error.status, 401);

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_login() -> Result<(), Box<dyn std::error::Error>> {
        let (app, _) = test_app().await?;

        let body = MockLoginRequest {
            email: Some("demo@fmss.mx".to_string()),
            password: Some("cualquiera".to_string()),
        };
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/login", &body)?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        let ok: MockLoginResponse = read_json(response).await?;
        assert_eq!(ok.token.as_deref(), Some("mock-jwt-token-123456"));

        let response = app
            .oneshot(json_request(Method::POST, "/api/login", &MockLoginRequest::default())?)
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let failed: MockLoginResponse = read_json(response).await?;
        assert!(!failed.success);
        assert_eq!(failed.message, "Faltan credenciales");

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_login_without_json_body() -> Result<(), Box<dyn std::error::Error>> {
        let (app, _) = test_app().await?;

        for body in ["", "email=demo"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/login")
                        .method(Method::POST)
                        .body(Body::from(body))?,
                )
                .await?;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let failed: MockLoginResponse = read_json(response).await?;
            assert!(!failed.success);
            assert_eq!(failed.message, "Faltan credenciales");
        }

        Ok(())
    }
}
