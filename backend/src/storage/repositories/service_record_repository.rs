use anyhow::Result;
use async_trait::async_trait;
use shared::ServiceRecord;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};

use crate::storage::connection::DbConnection;
use crate::storage::traits::{RecordFilter, ServiceRecordStorage};

/// Repository for completed service records
#[derive(Clone)]
pub struct ServiceRecordRepository {
    db: DbConnection,
}

impl ServiceRecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<ServiceRecord> {
        let duration: i64 = row.try_get("duration_minutes")?;
        Ok(ServiceRecord {
            id: row.try_get("id")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            client_name: row.try_get("client_name")?,
            service_name: row.try_get("service_name")?,
            duration_minutes: u32::try_from(duration)?,
            price: row.try_get("price")?,
        })
    }
}

#[async_trait]
impl ServiceRecordStorage for ServiceRecordRepository {
    async fn store_record(&self, record: &ServiceRecord) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO service_records (date, time, client_name, service_name, duration_minutes, price)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.date)
        .bind(&record.time)
        .bind(&record.client_name)
        .bind(&record.service_name)
        .bind(i64::from(record.duration_minutes))
        .bind(record.price)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<ServiceRecord>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, date, time, client_name, service_name, duration_minutes, price \
             FROM service_records WHERE 1 = 1",
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
        query.push(" ORDER BY date DESC, time DESC, id DESC");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn count_records(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM service_records")
            .fetch_one(self.db.pool())
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(u64::try_from(total)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, client: &str, price: f64) -> ServiceRecord {
        ServiceRecord {
            id: 0,
            date: date.to_string(),
            time: "11:00".to_string(),
            client_name: client.to_string(),
            service_name: "Carga de gas refrigerante".to_string(),
            duration_minutes: 60,
            price,
        }
    }

    #[tokio::test]
    async fn test_list_records_most_recent_first() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = ServiceRecordRepository::new(db);

        repo.store_record(&record("2025-05-02", "Ana", 500.0)).await.unwrap();
        repo.store_record(&record("2025-05-20", "Luis", 700.0)).await.unwrap();
        repo.store_record(&record("2025-04-28", "Ana", 300.0)).await.unwrap();

        let records = repo.list_records(&RecordFilter::default()).await.unwrap();
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-05-20", "2025-05-02", "2025-04-28"]);
        assert_eq!(repo.count_records().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_records_with_filters() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = ServiceRecordRepository::new(db);

        repo.store_record(&record("2025-05-02", "Ana", 500.0)).await.unwrap();
        repo.store_record(&record("2025-05-20", "Luis", 700.0)).await.unwrap();
        repo.store_record(&record("2025-04-28", "Ana", 300.0)).await.unwrap();

        let may = repo
            .list_records(&RecordFilter::date_range("2025-05-01", "2025-05-31"))
            .await
            .unwrap();
        assert_eq!(may.len(), 2);

        let ana = repo
            .list_records(&RecordFilter {
                client_name: Some("Ana".to_string()),
                ..RecordFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(ana.len(), 2);
        assert!(ana.iter().all(|r| r.client_name == "Ana"));
    }
}
