use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::storage::{AppointmentStorage, RecordFilter};
use shared::{
    Appointment, AppointmentListResponse, AppointmentResponse, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};

const MAX_NAME_LENGTH: usize = 120;

/// Service for the appointments calendar (Citas)
#[derive(Clone)]
pub struct AppointmentService {
    storage: Arc<dyn AppointmentStorage>,
}

impl AppointmentService {
    pub fn new(storage: Arc<dyn AppointmentStorage>) -> Self {
        Self { storage }
    }

    /// Create a new appointment; status defaults to pending
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> DomainResult<AppointmentResponse> {
        info!(
            "Creating appointment: date={}, time={}, client={}",
            request.date, request.time, request.client_name
        );

        let mut appointment = Appointment {
            id: 0,
            date: normalize_date(&request.date)?,
            time: normalize_time(&request.time)?,
            client_name: required_name("client_name", &request.client_name)?,
            service_name: required_name("service_name", &request.service_name)?,
            status: request.status.unwrap_or_default(),
        };

        appointment.id = self.storage.store_appointment(&appointment).await?;

        info!("Created appointment {} for {}", appointment.id, appointment.client_name);

        Ok(AppointmentResponse {
            appointment,
            success_message: "Cita creada correctamente".to_string(),
        })
    }

    pub async fn get_appointment(&self, id: i64) -> DomainResult<Appointment> {
        info!("Getting appointment: {}", id);

        self.storage
            .get_appointment(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id))
    }

    /// List appointments ordered by date and time
    pub async fn list_appointments(&self, filter: RecordFilter) -> DomainResult<AppointmentListResponse> {
        info!("Listing appointments with filter: {:?}", filter);

        let filter = RecordFilter {
            start_date: filter.start_date.as_deref().map(normalize_date).transpose()?,
            end_date: filter.end_date.as_deref().map(normalize_date).transpose()?,
            client_name: filter
                .client_name
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        };

        let appointments = self.storage.list_appointments(&filter).await?;
        info!("Found {} appointments", appointments.len());

        Ok(AppointmentListResponse { appointments })
    }

    /// Apply the provided fields to an existing appointment
    pub async fn update_appointment(
        &self,
        id: i64,
        request: UpdateAppointmentRequest,
    ) -> DomainResult<AppointmentResponse> {
        info!("Updating appointment: {}", id);

        let mut appointment = self.get_appointment(id).await?;

        if let Some(date) = request.date {
            appointment.date = normalize_date(&date)?;
        }
        if let Some(time) = request.time {
            appointment.time = normalize_time(&time)?;
        }
        if let Some(client_name) = request.client_name {
            appointment.client_name = required_name("client_name", &client_name)?;
        }
        if let Some(service_name) = request.service_name {
            appointment.service_name = required_name("service_name", &service_name)?;
        }
        if let Some(status) = request.status {
            appointment.status = status;
        }

        self.storage.update_appointment(&appointment).await?;

        Ok(AppointmentResponse {
            appointment,
            success_message: "Cita actualizada correctamente".to_string(),
        })
    }

    pub async fn delete_appointment(&self, id: i64) -> DomainResult<()> {
        info!("Deleting appointment: {}", id);

        if !self.storage.delete_appointment(id).await? {
            warn!("Appointment not found for deletion: {}", id);
            return Err(DomainError::not_found("Appointment", id));
        }
        Ok(())
    }
}

/// Parse a YYYY-MM-DD date and return it in canonical form
pub fn normalize_date(value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation("date is required"));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| DomainError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Parse an HH:MM time and return it zero-padded
pub fn normalize_time(value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation("time is required"));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| DomainError::validation(format!("Invalid time '{}', expected HH:MM", value)))
}

fn required_name(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(value.to_string())
}
