//! # Storage Module
//!
//! Handles all data persistence for the FMSS dashboard.
//!
//! The hosted table store the dashboard used to query directly is replaced
//! by a local SQLite database accessed through sqlx. Domain services only
//! see the traits in [`traits`]; the repositories in [`repositories`] are
//! the SQLite implementations.
//!
//! ## Tables
//!
//! - **appointments** - scheduled visits (Citas)
//! - **services** - service catalog (Servicios)
//! - **users** - dashboard logins, plaintext passwords
//! - **service_records** - completed services used for history and invoicing
//!
//! Identifiers are assigned by SQLite (`INTEGER PRIMARY KEY AUTOINCREMENT`).
//! There is no referential integrity between tables: appointments carry the
//! client and service by name.

pub mod connection;
pub mod repositories;
pub mod seed;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{
    AppointmentRepository,
    ServiceRecordRepository,
    ServiceRepository,
    UserRepository,
};
pub use traits::{
    AppointmentStorage,
    RecordFilter,
    ServiceRecordStorage,
    ServiceStorage,
    UserStorage,
};
