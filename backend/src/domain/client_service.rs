use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::storage::{AppointmentStorage, RecordFilter};
use shared::{Appointment, ClientListResponse, ClientSummary};

/// Clients (Clientes) are not stored on their own; they are derived from
/// the names on appointments.
#[derive(Clone)]
pub struct ClientService {
    appointments: Arc<dyn AppointmentStorage>,
}

impl ClientService {
    pub fn new(appointments: Arc<dyn AppointmentStorage>) -> Self {
        Self { appointments }
    }

    /// Summaries over every stored appointment
    pub async fn list_clients(&self) -> DomainResult<ClientListResponse> {
        info!("Listing clients from appointments");

        let appointments = self
            .appointments
            .list_appointments(&RecordFilter::default())
            .await?;
        let clients = Self::summarize(&appointments);

        info!("Found {} clients in {} appointments", clients.len(), appointments.len());
        Ok(ClientListResponse { clients })
    }

    /// Group appointments by trimmed client name, counting them and keeping
    /// the latest date. Blank names are skipped; output is ordered by name.
    pub fn summarize(appointments: &[Appointment]) -> Vec<ClientSummary> {
        let mut by_name: BTreeMap<String, ClientSummary> = BTreeMap::new();

        for appointment in appointments {
            let name = appointment.client_name.trim();
            if name.is_empty() {
                continue;
            }

            let summary = by_name
                .entry(name.to_string())
                .or_insert_with(|| ClientSummary {
                    name: name.to_string(),
                    appointment_count: 0,
                    last_appointment_date: appointment.date.clone(),
                    phone: None,
                    address: None,
                });

            summary.appointment_count += 1;
            // ISO dates compare correctly as strings
            if appointment.date > summary.last_appointment_date {
                summary.last_appointment_date = appointment.date.clone();
            }
        }

        by_name.into_values().collect()
    }
}
