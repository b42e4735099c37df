//! # REST API for Clients (Clientes)
//!
//! Clients are read-only summaries derived from appointments.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_clients))
}

async fn list_clients(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("GET /api/clients");

    let response = state.client_service.list_clients().await?;
    Ok(Json(response))
}
