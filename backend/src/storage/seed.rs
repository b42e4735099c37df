//! Demo data for a fresh database. Each table is only filled when it is
//! empty, so restarting the server never duplicates rows.

use anyhow::Result;
use chrono::{Days, NaiveDate};
use shared::{Appointment, AppointmentStatus, Service};
use std::sync::Arc;
use tracing::info;

use crate::domain::history_service::HistoryService;
use crate::domain::models::user::User;
use crate::storage::connection::DbConnection;
use crate::storage::repositories::{
    AppointmentRepository, ServiceRecordRepository, ServiceRepository, UserRepository,
};
use crate::storage::traits::{AppointmentStorage, RecordFilter, ServiceStorage, UserStorage};

const MOCK_HISTORY_SIZE: usize = 40;

const DEMO_CLIENTS: [&str; 5] = [
    "Empresa S.A. de C.V.",
    "Juan Pérez",
    "Clínica San Rafael",
    "María López",
    "Hotel Las Palmas",
];

/// (name, description, price, minutes, active)
const DEMO_SERVICES: [(&str, &str, f64, u32, bool); 5] = [
    ("Mantenimiento Aire Acondicionado", "Limpieza de filtros, serpentines y revisión general", 950.0, 120, true),
    ("Carga de gas refrigerante", "Recarga y prueba de fugas", 700.0, 60, true),
    ("Instalación de minisplit", "Instalación estándar hasta 3 metros de tubería", 2500.0, 240, true),
    ("Diagnóstico eléctrico", "Revisión de tablero y cableado", 450.0, 45, true),
    ("Limpieza de ductos", "Limpieza de ductos de ventilación", 1200.0, 180, false),
];

pub async fn seed_demo_data(db: &DbConnection, today: NaiveDate) -> Result<()> {
    let users = UserRepository::new(db.clone());
    let services = ServiceRepository::new(db.clone());
    let appointments = AppointmentRepository::new(db.clone());

    if users.count_users().await? == 0 {
        users
            .store_user(&User {
                id: 0,
                name: "admin".to_string(),
                email: Some("admin@fmss.mx".to_string()),
                password: "admin123".to_string(),
                role: "admin".to_string(),
            })
            .await?;
        info!("Seeded demo user 'admin'");
    }

    if services.list_services(false).await?.is_empty() {
        for (name, description, price, minutes, active) in DEMO_SERVICES {
            services
                .store_service(&Service {
                    id: 0,
                    name: name.to_string(),
                    description: description.to_string(),
                    price,
                    estimated_duration_minutes: minutes,
                    active,
                })
                .await?;
        }
        info!("Seeded {} demo services", DEMO_SERVICES.len());
    }

    if appointments
        .list_appointments(&RecordFilter::default())
        .await?
        .is_empty()
    {
        let demo = demo_appointments(today);
        for appointment in &demo {
            appointments.store_appointment(appointment).await?;
        }
        info!("Seeded {} demo appointments", demo.len());
    }

    let history_service = HistoryService::new(Arc::new(ServiceRecordRepository::new(db.clone())));
    if history_service.is_empty().await? {
        let catalog = services.list_services(true).await?;
        let clients: Vec<String> = DEMO_CLIENTS.iter().map(|c| c.to_string()).collect();
        let history =
            HistoryService::generate_mock_history(today, &catalog, &clients, MOCK_HISTORY_SIZE);
        let stored = history_service.store_records(&history).await?;
        info!("Seeded {} mock service records", stored);
    }

    Ok(())
}

/// A handful of appointments from a week ago to two weeks ahead
fn demo_appointments(today: NaiveDate) -> Vec<Appointment> {
    let plan: [(i64, &str, usize, usize, AppointmentStatus); 8] = [
        (-7, "10:00", 0, 0, AppointmentStatus::Confirmed),
        (-3, "12:30", 1, 1, AppointmentStatus::Confirmed),
        (0, "09:00", 2, 0, AppointmentStatus::Confirmed),
        (0, "11:00", 0, 3, AppointmentStatus::Pending),
        (1, "16:00", 3, 1, AppointmentStatus::Pending),
        (3, "10:30", 4, 2, AppointmentStatus::Confirmed),
        (8, "13:00", 1, 0, AppointmentStatus::Pending),
        (14, "09:30", 2, 3, AppointmentStatus::Confirmed),
    ];

    plan.iter()
        .filter_map(|(offset, time, client, service, status)| {
            let date = if *offset < 0 {
                today.checked_sub_days(Days::new(offset.unsigned_abs()))?
            } else {
                today.checked_add_days(Days::new(*offset as u64))?
            };
            Some(Appointment {
                id: 0,
                date: date.format("%Y-%m-%d").to_string(),
                time: time.to_string(),
                client_name: DEMO_CLIENTS[*client].to_string(),
                service_name: DEMO_SERVICES[*service].0.to_string(),
                status: *status,
            })
        })
        .collect()
}
