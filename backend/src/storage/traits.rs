//! # Storage Traits
//!
//! Storage abstractions the domain services depend on. The SQLite
//! repositories are the only implementation today; the traits keep the
//! services independent of sqlx.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Appointment, Service, ServiceRecord};

use crate::domain::models::user::User;

/// Optional filters shared by the appointment and history listings.
/// Dates are inclusive ISO dates (YYYY-MM-DD).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub client_name: Option<String>,
}

impl RecordFilter {
    pub fn date_range(start_date: &str, end_date: &str) -> Self {
        Self {
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
            client_name: None,
        }
    }
}

#[async_trait]
pub trait AppointmentStorage: Send + Sync {
    /// Insert a new appointment and return the id assigned by the store
    async fn store_appointment(&self, appointment: &Appointment) -> Result<i64>;

    async fn get_appointment(&self, id: i64) -> Result<Option<Appointment>>;

    /// List appointments ordered by date then time (oldest first)
    async fn list_appointments(&self, filter: &RecordFilter) -> Result<Vec<Appointment>>;

    async fn update_appointment(&self, appointment: &Appointment) -> Result<()>;

    /// Returns true if a row was deleted
    async fn delete_appointment(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ServiceStorage: Send + Sync {
    async fn store_service(&self, service: &Service) -> Result<i64>;

    async fn get_service(&self, id: i64) -> Result<Option<Service>>;

    /// List services ordered by name
    async fn list_services(&self, active_only: bool) -> Result<Vec<Service>>;

    async fn update_service(&self, service: &Service) -> Result<()>;

    async fn delete_service(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    async fn store_user(&self, user: &User) -> Result<i64>;

    /// Find a user whose name or email equals `identifier` (case-insensitive)
    /// and whose password equals `password` exactly
    async fn find_by_credentials(&self, identifier: &str, password: &str) -> Result<Option<User>>;

    async fn count_users(&self) -> Result<u64>;
}

#[async_trait]
pub trait ServiceRecordStorage: Send + Sync {
    async fn store_record(&self, record: &ServiceRecord) -> Result<i64>;

    /// List records most recent first
    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<ServiceRecord>>;

    async fn count_records(&self) -> Result<u64>;
}
