//! Login session kept in browser local storage.
//!
//! Values are stored as raw strings under the keys the dashboard has always
//! used, so a session survives page reloads. Logging out only removes the
//! authentication flag; the last user's name and email stay behind.

use gloo::storage::{LocalStorage, Storage};
use shared::UserProfile;

pub const KEY_AUTHENTICATED: &str = "isAuthenticated";
pub const KEY_ROLE: &str = "userRole";
pub const KEY_NAME: &str = "userName";
pub const KEY_EMAIL: &str = "userEmail";

pub const DEFAULT_ROLE: &str = "usuario";
pub const DEFAULT_NAME: &str = "Usuario";
pub const NO_EMAIL: &str = "Sin correo";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_name: String,
    pub user_email: String,
    pub user_role: String,
}

impl Session {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let role = profile.role.trim();
        Self {
            user_name: profile.name.clone(),
            user_email: profile
                .email
                .clone()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| NO_EMAIL.to_string()),
            user_role: if role.is_empty() {
                DEFAULT_ROLE.to_string()
            } else {
                role.to_string()
            },
        }
    }
}

fn read(key: &str) -> Option<String> {
    LocalStorage::raw().get_item(key).ok().flatten()
}

fn write(key: &str, value: &str) {
    if LocalStorage::raw().set_item(key, value).is_err() {
        gloo::console::warn!("Failed to write session key", key);
    }
}

/// Persist a successful login
pub fn save(session: &Session) {
    write(KEY_AUTHENTICATED, "true");
    write(KEY_ROLE, &session.user_role);
    write(KEY_NAME, &session.user_name);
    write(KEY_EMAIL, &session.user_email);
}

/// The stored session, if the authentication flag is set
pub fn load() -> Option<Session> {
    if read(KEY_AUTHENTICATED).as_deref() != Some("true") {
        return None;
    }

    Some(Session {
        user_name: read(KEY_NAME).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        user_email: read(KEY_EMAIL).unwrap_or_else(|| NO_EMAIL.to_string()),
        user_role: read(KEY_ROLE).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
    })
}

pub fn logout() {
    LocalStorage::delete(KEY_AUTHENTICATED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_profile_defaults() {
        let profile = UserProfile {
            id: 2,
            name: "recepcion".to_string(),
            email: None,
            role: "".to_string(),
        };

        let session = Session::from_profile(&profile);
        assert_eq!(session.user_email, "Sin correo");
        assert_eq!(session.user_role, "usuario");
        assert_eq!(session.user_name, "recepcion");
    }

    #[test]
    fn test_from_profile_keeps_values() {
        let profile = UserProfile {
            id: 1,
            name: "admin".to_string(),
            email: Some("admin@fmss.mx".to_string()),
            role: "admin".to_string(),
        };

        let session = Session::from_profile(&profile);
        assert_eq!(session.user_email, "admin@fmss.mx");
        assert_eq!(session.user_role, "admin");
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_save_load_logout() {
        save(&Session {
            user_name: "Usuario Prueba".to_string(),
            user_email: "demo@fmss.mx".to_string(),
            user_role: DEFAULT_ROLE.to_string(),
        });
        let loaded = load().expect("session should be stored");
        assert_eq!(loaded.user_email, "demo@fmss.mx");

        logout();
        assert!(load().is_none());
        // Name survives logout
        assert_eq!(read(KEY_NAME).as_deref(), Some("Usuario Prueba"));
    }
}
