use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::calendar::CalendarService;
use crate::domain::errors::DomainResult;
use crate::storage::{RecordFilter, ServiceRecordStorage};
use shared::{BillingLine, BillingSummary, ServiceRecord};

/// Invoicing (Facturación) built from completed service records
#[derive(Clone)]
pub struct BillingService {
    records: Arc<dyn ServiceRecordStorage>,
    calendar: CalendarService,
}

impl BillingService {
    pub fn new(records: Arc<dyn ServiceRecordStorage>, calendar: CalendarService) -> Self {
        Self { records, calendar }
    }

    pub async fn monthly_summary(&self, month: u32, year: u32) -> DomainResult<BillingSummary> {
        info!("Building billing summary for {}/{}", month, year);

        let (start, end) = self.calendar.month_date_range(month, year)?;
        let records = self
            .records
            .list_records(&RecordFilter::date_range(&start, &end))
            .await?;

        Ok(Self::summarize(month, year, &records))
    }

    /// One line per client, ordered by name
    pub fn summarize(month: u32, year: u32, records: &[ServiceRecord]) -> BillingSummary {
        let mut lines: BTreeMap<&str, BillingLine> = BTreeMap::new();

        for record in records {
            let line = lines
                .entry(record.client_name.as_str())
                .or_insert_with(|| BillingLine {
                    client_name: record.client_name.clone(),
                    service_count: 0,
                    total: 0.0,
                });
            line.service_count += 1;
            line.total += record.price;
        }

        let lines: Vec<BillingLine> = lines.into_values().collect();
        let total = lines.iter().map(|l| l.total).sum();

        BillingSummary {
            month,
            year,
            lines,
            record_count: records.len() as u32,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::storage::{DbConnection, ServiceRecordRepository};

    fn record(date: &str, client: &str, price: f64) -> ServiceRecord {
        ServiceRecord {
            id: 0,
            date: date.to_string(),
            time: "09:00".to_string(),
            client_name: client.to_string(),
            service_name: "Mantenimiento".to_string(),
            duration_minutes: 60,
            price,
        }
    }

    #[test]
    fn test_summarize_groups_by_client() {
        let records = vec![
            record("2025-05-02", "Luis", 300.0),
            record("2025-05-03", "Ana", 500.0),
            record("2025-05-04", "Luis", 200.0),
        ];

        let summary = BillingService::summarize(5, 2025, &records);

        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.total, 1000.0);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].client_name, "Ana");
        assert_eq!(summary.lines[1].service_count, 2);
        assert_eq!(summary.lines[1].total, 500.0);
    }

    #[tokio::test]
    async fn test_monthly_summary_only_counts_that_month() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = Arc::new(ServiceRecordRepository::new(db));
        repo.store_record(&record("2025-04-30", "Ana", 100.0)).await.unwrap();
        repo.store_record(&record("2025-05-01", "Ana", 200.0)).await.unwrap();
        repo.store_record(&record("2025-05-31", "Luis", 300.0)).await.unwrap();
        repo.store_record(&record("2025-06-01", "Luis", 400.0)).await.unwrap();

        let billing = BillingService::new(repo, CalendarService::new());
        let summary = billing.monthly_summary(5, 2025).await.unwrap();

        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.total, 500.0);

        assert!(matches!(
            billing.monthly_summary(13, 2025).await,
            Err(DomainError::Validation(_))
        ));
    }
}
