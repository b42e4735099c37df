use anyhow::Result;
use async_trait::async_trait;
use shared::Service;
use sqlx::{sqlite::SqliteRow, Row};

use crate::storage::connection::DbConnection;
use crate::storage::traits::ServiceStorage;

/// Repository for the service catalog
#[derive(Clone)]
pub struct ServiceRepository {
    db: DbConnection,
}

impl ServiceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<Service> {
        let duration: i64 = row.try_get("estimated_duration_minutes")?;
        Ok(Service {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            estimated_duration_minutes: u32::try_from(duration)?,
            active: row.try_get("active")?,
        })
    }
}

#[async_trait]
impl ServiceStorage for ServiceRepository {
    async fn store_service(&self, service: &Service) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO services (name, description, price, estimated_duration_minutes, active)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price)
        .bind(i64::from(service.estimated_duration_minutes))
        .bind(service.active)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn get_service(&self, id: i64) -> Result<Option<Service>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price, estimated_duration_minutes, active
            FROM services
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_services(&self, active_only: bool) -> Result<Vec<Service>> {
        let sql = if active_only {
            r#"
            SELECT id, name, description, price, estimated_duration_minutes, active
            FROM services
            WHERE active = TRUE
            ORDER BY name ASC
            "#
        } else {
            r#"
            SELECT id, name, description, price, estimated_duration_minutes, active
            FROM services
            ORDER BY name ASC
            "#
        };

        let rows = sqlx::query(sql).fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn update_service(&self, service: &Service) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE services
            SET name = ?, description = ?, price = ?, estimated_duration_minutes = ?,
                active = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price)
        .bind(i64::from(service.estimated_duration_minutes))
        .bind(service.active)
        .bind(service.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_service(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> ServiceRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        ServiceRepository::new(db)
    }

    fn service(name: &str, active: bool) -> Service {
        Service {
            id: 0,
            name: name.to_string(),
            description: format!("{} completo", name),
            price: 850.0,
            estimated_duration_minutes: 90,
            active,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_service() {
        let repo = setup_test().await;

        let id = repo.store_service(&service("Limpieza de ductos", true)).await.unwrap();
        let stored = repo.get_service(id).await.unwrap().expect("service should exist");

        assert_eq!(stored.name, "Limpieza de ductos");
        assert_eq!(stored.estimated_duration_minutes, 90);
        assert!(stored.active);
    }

    #[tokio::test]
    async fn test_list_services_active_only() {
        let repo = setup_test().await;

        repo.store_service(&service("Zonificación", true)).await.unwrap();
        repo.store_service(&service("Carga de gas", false)).await.unwrap();
        repo.store_service(&service("Auditoría eléctrica", true)).await.unwrap();

        let all = repo.list_services(false).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Auditoría eléctrica");

        let active = repo.list_services(true).await.unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|s| s.active));
    }

    #[tokio::test]
    async fn test_update_and_delete_service() {
        let repo = setup_test().await;

        let id = repo.store_service(&service("Revisión", true)).await.unwrap();
        let mut stored = repo.get_service(id).await.unwrap().unwrap();
        stored.price = 1200.5;
        stored.active = false;
        repo.update_service(&stored).await.unwrap();

        let updated = repo.get_service(id).await.unwrap().unwrap();
        assert_eq!(updated.price, 1200.5);
        assert!(!updated.active);

        assert!(repo.delete_service(id).await.unwrap());
        assert!(repo.get_service(id).await.unwrap().is_none());
    }
}
