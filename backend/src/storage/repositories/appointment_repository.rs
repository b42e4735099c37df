use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{Appointment, AppointmentStatus};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};

use crate::storage::connection::DbConnection;
use crate::storage::traits::{AppointmentStorage, RecordFilter};

/// Repository for appointment rows
#[derive(Clone)]
pub struct AppointmentRepository {
    db: DbConnection,
}

impl AppointmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<Appointment> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<AppointmentStatus>()
            .map_err(|e| anyhow!("Corrupt appointment row: {}", e))?;

        Ok(Appointment {
            id: row.try_get("id")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            client_name: row.try_get("client_name")?,
            service_name: row.try_get("service_name")?,
            status,
        })
    }
}

#[async_trait]
impl AppointmentStorage for AppointmentRepository {
    async fn store_appointment(&self, appointment: &Appointment) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO appointments (date, time, client_name, service_name, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.client_name)
        .bind(&appointment.service_name)
        .bind(appointment.status.as_str())
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn get_appointment(&self, id: i64) -> Result<Option<Appointment>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, time, client_name, service_name, status
            FROM appointments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_appointments(&self, filter: &RecordFilter) -> Result<Vec<Appointment>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, date, time, client_name, service_name, status FROM appointments WHERE 1 = 1",
        );
        if let Some(start) = &filter.start_date {
            query.push(" AND date >= ").push_bind(start.clone());
        }
        if let Some(end) = &filter.end_date {
            query.push(" AND date <= ").push_bind(end.clone());
        }
        if let Some(client) = &filter.client_name {
            query.push(" AND client_name = ").push_bind(client.clone());
        }
        query.push(" ORDER BY date ASC, time ASC, id ASC");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn update_appointment(&self, appointment: &Appointment) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE appointments
            SET date = ?, time = ?, client_name = ?, service_name = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.client_name)
        .bind(&appointment.service_name)
        .bind(appointment.status.as_str())
        .bind(appointment.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_appointment(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> AppointmentRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AppointmentRepository::new(db)
    }

    fn appointment(date: &str, time: &str, client: &str) -> Appointment {
        Appointment {
            id: 0,
            date: date.to_string(),
            time: time.to_string(),
            client_name: client.to_string(),
            service_name: "Mantenimiento preventivo".to_string(),
            status: AppointmentStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_appointment() {
        let repo = setup_test().await;

        let id = repo
            .store_appointment(&appointment("2025-06-14", "10:00", "Ana López"))
            .await
            .expect("Failed to store appointment");

        let stored = repo.get_appointment(id).await.expect("Failed to get").unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.client_name, "Ana López");
        assert_eq!(stored.status, AppointmentStatus::Pending);
    }

    #[tokio::test]
    async fn test_ids_are_assigned_by_store() {
        let repo = setup_test().await;

        let first = repo.store_appointment(&appointment("2025-06-14", "10:00", "A")).await.unwrap();
        let second = repo.store_appointment(&appointment("2025-06-14", "11:00", "B")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_list_orders_by_date_and_time() {
        let repo = setup_test().await;

        repo.store_appointment(&appointment("2025-06-15", "09:00", "C")).await.unwrap();
        repo.store_appointment(&appointment("2025-06-14", "16:00", "B")).await.unwrap();
        repo.store_appointment(&appointment("2025-06-14", "08:30", "A")).await.unwrap();

        let all = repo.list_appointments(&RecordFilter::default()).await.unwrap();
        let clients: Vec<&str> = all.iter().map(|a| a.client_name.as_str()).collect();
        assert_eq!(clients, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_list_applies_filters() {
        let repo = setup_test().await;

        repo.store_appointment(&appointment("2025-05-31", "09:00", "Ana")).await.unwrap();
        repo.store_appointment(&appointment("2025-06-01", "09:00", "Ana")).await.unwrap();
        repo.store_appointment(&appointment("2025-06-30", "09:00", "Luis")).await.unwrap();
        repo.store_appointment(&appointment("2025-07-01", "09:00", "Ana")).await.unwrap();

        let june = repo
            .list_appointments(&RecordFilter::date_range("2025-06-01", "2025-06-30"))
            .await
            .unwrap();
        assert_eq!(june.len(), 2);

        let ana_in_june = repo
            .list_appointments(&RecordFilter {
                client_name: Some("Ana".to_string()),
                ..RecordFilter::date_range("2025-06-01", "2025-06-30")
            })
            .await
            .unwrap();
        assert_eq!(ana_in_june.len(), 1);
        assert_eq!(ana_in_june[0].date, "2025-06-01");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = setup_test().await;

        let id = repo.store_appointment(&appointment("2025-06-14", "10:00", "Ana")).await.unwrap();
        let mut stored = repo.get_appointment(id).await.unwrap().unwrap();
        stored.status = AppointmentStatus::Confirmed;
        stored.time = "12:00".to_string();
        repo.update_appointment(&stored).await.unwrap();

        let updated = repo.get_appointment(id).await.unwrap().unwrap();
        assert_eq!(updated.status, AppointmentStatus::Confirmed);
        assert_eq!(updated.time, "12:00");

        assert!(repo.delete_appointment(id).await.unwrap());
        assert!(!repo.delete_appointment(id).await.unwrap());
        assert!(repo.get_appointment(id).await.unwrap().is_none());
    }
}
