//! # IO Module
//!
//! Interface layer between the dashboard UI and the domain logic. Today the
//! only transport is the axum REST API in [`rest`]; it turns HTTP requests
//! into domain calls and domain results into JSON responses.

pub mod rest;
