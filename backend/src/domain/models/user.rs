use shared::UserProfile;

/// Role assigned when the users table leaves it empty
pub const DEFAULT_ROLE: &str = "usuario";

/// Dashboard user as stored. The password is compared in plaintext and
/// never leaves the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub password: String,
    pub role: String,
}

impl User {
    pub fn to_profile(&self) -> UserProfile {
        let role = if self.role.trim().is_empty() {
            DEFAULT_ROLE.to_string()
        } else {
            self.role.clone()
        };

        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role,
        }
    }
}
