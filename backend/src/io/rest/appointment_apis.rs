//! # REST API for Appointments (Citas)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::storage::RecordFilter;
use crate::AppState;
use shared::{CreateAppointmentRequest, UpdateAppointmentRequest};

/// Optional filters for listing appointments
#[derive(Debug, Deserialize, Default)]
pub struct AppointmentQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub client_name: Option<String>,
}

impl From<AppointmentQuery> for RecordFilter {
    fn from(query: AppointmentQuery) -> Self {
        RecordFilter {
            start_date: query.start_date,
            end_date: query.end_date,
            client_name: query.client_name,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments).post(create_appointment))
        .route(
            "/:id",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
}

async fn list_appointments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AppointmentQuery>,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/appointments - query: {:?}", query);

    let response = state.appointment_service.list_appointments(query.into()).await?;
    Ok(Json(response))
}

async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateAppointmentRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/appointments - request: {:?}", request);

    let response = state.appointment_service.create_appointment(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/appointments/{}", id);

    let appointment = state.appointment_service.get_appointment(id).await?;
    Ok(Json(appointment))
}

async fn update_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateAppointmentRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("PUT /api/appointments/{} - request: {:?}", id, request);

    let response = state.appointment_service.update_appointment(id, request).await?;
    Ok(Json(response))
}

async fn delete_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    info!("DELETE /api/appointments/{}", id);

    state.appointment_service.delete_appointment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
