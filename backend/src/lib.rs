//! # FMSS Backend
//!
//! HTTP API behind the FMSS dashboard (appointments, clients, services and
//! invoicing for a maintenance company).
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (Yew frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```
//!
//! [`initialize_backend`] wires the storage repositories into the domain
//! services and [`create_router`] mounts every REST module under `/api`,
//! with the built frontend served for all other paths.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::{
    AppointmentService, AuthService, BillingService, CalendarService, CatalogService,
    ClientService, DashboardService, HistoryService,
};
use crate::storage::{
    AppointmentRepository, DbConnection, ServiceRecordRepository, ServiceRepository,
    UserRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub appointment_service: AppointmentService,
    pub calendar_service: CalendarService,
    pub client_service: ClientService,
    pub catalog_service: CatalogService,
    pub auth_service: AuthService,
    pub history_service: HistoryService,
    pub dashboard_service: DashboardService,
    pub billing_service: BillingService,
}

impl AppState {
    /// Build every service on top of one database connection
    pub fn from_db(db: DbConnection) -> Self {
        let appointments = Arc::new(AppointmentRepository::new(db.clone()));
        let services = Arc::new(ServiceRepository::new(db.clone()));
        let users = Arc::new(UserRepository::new(db.clone()));
        let records = Arc::new(ServiceRecordRepository::new(db));

        let calendar_service = CalendarService::new();

        Self {
            appointment_service: AppointmentService::new(appointments.clone()),
            client_service: ClientService::new(appointments.clone()),
            catalog_service: CatalogService::new(services.clone()),
            auth_service: AuthService::new(users),
            history_service: HistoryService::new(records.clone()),
            dashboard_service: DashboardService::new(
                appointments,
                records.clone(),
                services,
                calendar_service.clone(),
            ),
            billing_service: BillingService::new(records, calendar_service.clone()),
            calendar_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    if config.seed_demo {
        info!("Seeding demo data where tables are empty");
        storage::seed::seed_demo_data(&db_conn, chrono::Local::now().date_naive()).await?;
    }

    info!("Setting up application state");
    Ok(AppState::from_db(db_conn))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let cors = match config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            warn!("Invalid allowed origin '{}', CORS disabled", config.allowed_origin);
            CorsLayer::new()
        }
    }
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
    .allow_headers(Any);

    Router::new()
        .nest("/api", io::rest::router())
        .fallback_service(ServeDir::new(&config.frontend_dist))
        .layer(cors)
        .with_state(app_state)
}
