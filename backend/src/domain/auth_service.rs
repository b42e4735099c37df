use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::storage::UserStorage;
use shared::{LoginRequest, LoginResponse, MockLoginRequest, MockLoginResponse, MockUser};

/// Token returned by the stub login endpoint
pub const MOCK_TOKEN: &str = "mock-jwt-token-123456";

/// Login against the users table. Passwords are plaintext and compared
/// exactly; this is not a security boundary.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStorage>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStorage>) -> Self {
        Self { users }
    }

    /// `username` may be either the user name or the email
    pub async fn login(&self, request: LoginRequest) -> DomainResult<LoginResponse> {
        let identifier = request.username.trim();
        if identifier.is_empty() || request.password.is_empty() {
            return Err(DomainError::validation("Por favor ingresa usuario y contraseña."));
        }

        info!("Login attempt for {}", identifier);

        let user = match self
            .users
            .find_by_credentials(identifier, &request.password)
            .await?
        {
            Some(user) => user,
            None => {
                warn!("Invalid credentials for {}", identifier);
                return Err(DomainError::InvalidCredentials);
            }
        };

        let profile = user.to_profile();
        info!("User {} logged in with role {}", profile.name, profile.role);

        Ok(LoginResponse {
            success_message: format!("Bienvenido, {}", profile.name),
            user: profile,
        })
    }

    /// Stub login used by the dashboard prototype: any non-empty pair succeeds
    pub fn mock_login(request: &MockLoginRequest) -> MockLoginResponse {
        let email = request.email.as_deref().unwrap_or_default();
        let password = request.password.as_deref().unwrap_or_default();

        if email.is_empty() || password.is_empty() {
            return MockLoginResponse {
                success: false,
                message: "Faltan credenciales".to_string(),
                token: None,
                user: None,
            };
        }

        MockLoginResponse {
            success: true,
            message: "Login exitoso".to_string(),
            token: Some(MOCK_TOKEN.to_string()),
            user: Some(MockUser {
                id: 1,
                nombre: "Usuario Prueba".to_string(),
                email: email.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::User;
    use crate::storage::{DbConnection, UserRepository};

    async fn setup_test() -> AuthService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = Arc::new(UserRepository::new(db));
        repo.store_user(&User {
            id: 0,
            name: "Recepcion".to_string(),
            email: Some("recepcion@fmss.mx".to_string()),
            password: "clave2025".to_string(),
            role: String::new(),
        })
        .await
        .unwrap();
        AuthService::new(repo)
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_by_name_or_email() {
        let auth = setup_test().await;

        let by_name = auth.login(login("recepcion", "clave2025")).await.unwrap();
        assert_eq!(by_name.user.name, "Recepcion");
        assert_eq!(by_name.user.role, "usuario");

        let by_email = auth.login(login(" RECEPCION@fmss.mx ", "clave2025")).await.unwrap();
        assert_eq!(by_email.user.email.as_deref(), Some("recepcion@fmss.mx"));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let auth = setup_test().await;

        assert!(matches!(
            auth.login(login("recepcion", "Clave2025")).await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_blank_fields() {
        let auth = setup_test().await;

        assert!(matches!(
            auth.login(login("  ", "clave2025")).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            auth.login(login("recepcion", "")).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_mock_login() {
        let ok = AuthService::mock_login(&MockLoginRequest {
            email: Some("a@b.mx".to_string()),
            password: Some("x".to_string()),
        });
        assert!(ok.success);
        assert_eq!(ok.token.as_deref(), Some(MOCK_TOKEN));
        assert_eq!(ok.user.unwrap().email, "a@b.mx");

        let missing = AuthService::mock_login(&MockLoginRequest {
            email: Some("a@b.mx".to_string()),
            password: None,
        });
        assert!(!missing.success);
        assert_eq!(missing.message, "Faltan credenciales");
        assert!(missing.token.is_none());
    }
}
