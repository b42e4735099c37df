//! # Domain Module
//!
//! Business logic of the FMSS dashboard. Services here sit between the REST
//! handlers in `io::rest` and the storage traits, and never touch sqlx
//! directly.
//!
//! ## Services
//!
//! - [`AppointmentService`] - appointment CRUD with date and time validation (Citas)
//! - [`CalendarService`] - month grid, focus-date navigation and today
//! - [`ClientService`] - client summaries derived from appointments (Clientes)
//! - [`CatalogService`] - service catalog with active toggle (Servicios)
//! - [`AuthService`] - plaintext login against the users table, plus the stub login
//! - [`HistoryService`] - completed service records and mock history generation
//! - [`DashboardService`] - figures and notices for the home page (Inicio)
//! - [`BillingService`] - monthly per-client totals (Facturación)
//!
//! Errors are reported as [`DomainError`]; storage failures arrive as
//! `anyhow::Error` and are wrapped in `DomainError::Storage`.

pub mod appointment_service;
pub mod auth_service;
pub mod billing_service;
pub mod calendar;
pub mod catalog_service;
pub mod client_service;
pub mod dashboard_service;
pub mod errors;
pub mod history_service;
pub mod models;

pub use appointment_service::AppointmentService;
pub use auth_service::AuthService;
pub use billing_service::BillingService;
pub use calendar::CalendarService;
pub use catalog_service::CatalogService;
pub use client_service::ClientService;
pub use dashboard_service::DashboardService;
pub use errors::{DomainError, DomainResult};
pub use history_service::HistoryService;
