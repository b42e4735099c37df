//! # REST API Interface Layer
//!
//! HTTP endpoints for the FMSS dashboard, all mounted under `/api`.
//! Handlers log the method and path on entry, delegate to a domain service
//! and map [`crate::domain::DomainError`] to a status code through
//! [`error::ApiError`]. No business logic lives here.
//!
//! | Prefix | Module |
//! | --- | --- |
//! | `/status`, `/login`, `/auth` | [`auth_apis`] |
//! | `/appointments` | [`appointment_apis`] |
//! | `/calendar` | [`calendar_apis`] |
//! | `/clients` | [`client_apis`] |
//! | `/services` | [`service_apis`] |
//! | `/history` | [`history_apis`] |
//! | `/dashboard` | [`dashboard_apis`] |
//! | `/billing` | [`billing_apis`] |
//! | `/logs` | [`logging_apis`] |

pub mod appointment_apis;
pub mod auth_apis;
pub mod billing_apis;
pub mod calendar_apis;
pub mod client_apis;
pub mod dashboard_apis;
pub mod error;
pub mod extract;
pub mod history_apis;
pub mod logging_apis;
pub mod service_apis;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Every API route, relative to `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(auth_apis::status))
        .route("/login", post(auth_apis::mock_login))
        .nest("/auth", auth_apis::router())
        .nest("/appointments", appointment_apis::router())
        .nest("/calendar", calendar_apis::router())
        .nest("/clients", client_apis::router())
        .nest("/services", service_apis::router())
        .nest("/history", history_apis::router())
        .nest("/dashboard", dashboard_apis::router())
        .nest("/billing", billing_apis::router())
        .nest("/logs", logging_apis::router())
}
