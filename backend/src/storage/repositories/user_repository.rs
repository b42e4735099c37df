use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::user::User;
use crate::storage::connection::DbConnection;
use crate::storage::traits::UserStorage;

/// Repository for dashboard users
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<User> {
        Ok(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            role: row.try_get("role")?,
        })
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.role)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn find_by_credentials(&self, identifier: &str, password: &str) -> Result<Option<User>> {
        // SQLite lower() only folds ASCII, so names are compared here
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, password, role
            FROM users
            WHERE password = ?
            ORDER BY id ASC
            "#,
        )
        .bind(password)
        .fetch_all(self.db.pool())
        .await?;

        let identifier = identifier.trim().to_lowercase();
        for row in &rows {
            let user = Self::map_row(row)?;
            let email_matches = user
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase() == identifier);
            if user.name.to_lowercase() == identifier || email_matches {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    async fn count_users(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(self.db.pool())
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(u64::try_from(total)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> UserRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = UserRepository::new(db);
        repo.store_user(&User {
            id: 0,
            name: "Admin".to_string(),
            email: Some("admin@fmss.mx".to_string()),
            password: "admin123".to_string(),
            role: "admin".to_string(),
        })
        .await
        .expect("Failed to store user");
        repo
    }

    #[tokio::test]
    async fn test_find_by_name_or_email_ignores_case() {
        let repo = setup_test().await;

        let by_name = repo.find_by_credentials("admin", "admin123").await.unwrap();
        assert!(by_name.is_some());

        let by_email = repo.find_by_credentials("ADMIN@FMSS.MX", "admin123").await.unwrap();
        assert_eq!(by_email.unwrap().role, "admin");
    }

    #[tokio::test]
    async fn test_find_by_accented_name_ignores_case() {
        let repo = setup_test().await;
        repo.store_user(&User {
            id: 0,
            name: "Recepción".to_string(),
            email: Some("Recepción@FMSS.mx".to_string()),
            password: "front123".to_string(),
            role: "staff".to_string(),
        })
        .await
        .unwrap();

        let by_name = repo.find_by_credentials("RECEPCIÓN", "front123").await.unwrap();
        assert_eq!(by_name.unwrap().name, "Recepción");

        let by_email = repo.find_by_credentials(" recepción@fmss.mx ", "front123").await.unwrap();
        assert_eq!(by_email.unwrap().role, "staff");

        assert!(repo.find_by_credentials("RECEPCIÓN", "admin123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_password_must_match_exactly() {
        let repo = setup_test().await;

        assert!(repo.find_by_credentials("admin", "ADMIN123").await.unwrap().is_none());
        assert!(repo.find_by_credentials("nobody", "admin123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_users() {
        let repo = setup_test().await;
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }
}
