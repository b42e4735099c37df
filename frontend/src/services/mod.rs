pub mod api;
pub mod client_contacts;
pub mod date_utils;
pub mod logging;
pub mod session;
