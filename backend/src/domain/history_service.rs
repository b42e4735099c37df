use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::errors::DomainResult;
use crate::storage::{RecordFilter, ServiceRecordStorage};
use shared::{Service, ServiceRecord, ServiceRecordListResponse};

/// Time slots used for generated history, in order
const MOCK_TIME_SLOTS: [&str; 5] = ["09:00", "10:30", "12:00", "15:00", "17:30"];

/// History of completed services
#[derive(Clone)]
pub struct HistoryService {
    storage: Arc<dyn ServiceRecordStorage>,
}

impl HistoryService {
    pub fn new(storage: Arc<dyn ServiceRecordStorage>) -> Self {
        Self { storage }
    }

    /// Completed services, most recent first, with the revenue they add up to
    pub async fn list_history(&self, filter: RecordFilter) -> DomainResult<ServiceRecordListResponse> {
        info!("Listing service history with filter: {:?}", filter);

        let records = self.storage.list_records(&filter).await?;
        let total_revenue = total_revenue(&records);

        Ok(ServiceRecordListResponse {
            records,
            total_revenue,
        })
    }

    /// Persist a batch of records, returning how many were stored
    pub async fn store_records(&self, records: &[ServiceRecord]) -> DomainResult<usize> {
        for record in records {
            self.storage.store_record(record).await?;
        }
        info!("Stored {} service records", records.len());
        Ok(records.len())
    }

    pub async fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.storage.count_records().await? == 0)
    }

    /// Build `count` synthetic records on the days before `today`.
    ///
    /// Record `i` falls `i / 2 + 1` days back (two visits a day), takes its
    /// service from `services[i % len]` and its client from `clients[i % len]`,
    /// and cycles through a fixed set of time slots. The same inputs always
    /// give the same records. Returns nothing when either list is empty.
    pub fn generate_mock_history(
        today: NaiveDate,
        services: &[Service],
        clients: &[String],
        count: usize,
    ) -> Vec<ServiceRecord> {
        if services.is_empty() || clients.is_empty() {
            return Vec::new();
        }

        let records: Vec<ServiceRecord> = (0..count)
            .filter_map(|i| {
                let days_back = (i / 2 + 1) as u64;
                let date = today.checked_sub_days(Days::new(days_back))?;
                let service = &services[i % services.len()];
                let client = &clients[i % clients.len()];

                Some(ServiceRecord {
                    id: 0,
                    date: date.format("%Y-%m-%d").to_string(),
                    time: MOCK_TIME_SLOTS[i % MOCK_TIME_SLOTS.len()].to_string(),
                    client_name: client.clone(),
                    service_name: service.name.clone(),
                    duration_minutes: service.estimated_duration_minutes,
                    price: service.price,
                })
            })
            .collect();

        debug!("Generated {} mock service records", records.len());
        records
    }
}

pub fn total_revenue(records: &[ServiceRecord]) -> f64 {
    records.iter().map(|r| r.price).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, ServiceRecordRepository};

    fn catalog() -> Vec<Service> {
        vec![
            Service {
                id: 1,
                name: "Mantenimiento preventivo".to_string(),
                description: String::new(),
                price: 900.0,
                estimated_duration_minutes: 120,
                active: true,
            },
            Service {
                id: 2,
                name: "Carga de gas".to_string(),
                description: String::new(),
                price: 650.0,
                estimated_duration_minutes: 60,
                active: true,
            },
        ]
    }

    fn clients() -> Vec<String> {
        vec!["Ana".to_string(), "Luis".to_string(), "Empresa S.A.".to_string()]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
    }

    #[test]
    fn test_generate_mock_history_is_deterministic() {
        let first = HistoryService::generate_mock_history(today(), &catalog(), &clients(), 10);
        let second = HistoryService::generate_mock_history(today(), &catalog(), &clients(), 10);

        assert_eq!(first.len(), 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_mock_history_cycles_inputs() {
        let records = HistoryService::generate_mock_history(today(), &catalog(), &clients(), 4);

        assert_eq!(records[0].date, "2025-03-01");
        assert_eq!(records[1].date, "2025-03-01");
        assert_eq!(records[2].date, "2025-02-28");
        assert_eq!(records[0].service_name, "Mantenimiento preventivo");
        assert_eq!(records[1].service_name, "Carga de gas");
        assert_eq!(records[1].price, 650.0);
        assert_eq!(records[1].duration_minutes, 60);
        assert_eq!(records[3].client_name, "Ana");
        assert!(records.iter().all(|r| r.date.as_str() < "2025-03-02"));
    }

    #[test]
    fn test_generate_mock_history_needs_services_and_clients() {
        assert!(HistoryService::generate_mock_history(today(), &[], &clients(), 5).is_empty());
        assert!(HistoryService::generate_mock_history(today(), &catalog(), &[], 5).is_empty());
    }

    #[tokio::test]
    async fn test_list_history_totals_revenue() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let history = HistoryService::new(Arc::new(ServiceRecordRepository::new(db)));
        assert!(history.is_empty().await.unwrap());

        let records = HistoryService::generate_mock_history(today(), &catalog(), &clients(), 4);
        assert_eq!(history.store_records(&records).await.unwrap(), 4);

        let response = history.list_history(RecordFilter::default()).await.unwrap();
        assert_eq!(response.records.len(), 4);
        assert_eq!(response.total_revenue, 900.0 + 650.0 + 900.0 + 650.0);

        let luis = history
            .list_history(RecordFilter {
                client_name: Some("Luis".to_string()),
                ..RecordFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(luis.records.len(), 1);
        assert_eq!(luis.total_revenue, 650.0);
    }
}
