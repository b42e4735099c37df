use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::extract::{ApiJson, ApiQuery};
use crate::storage::RecordFilter;
use crate::AppState;
use shared::{month_name, CalendarFocusDate, UpdateCalendarFocusRequest, UpdateCalendarFocusResponse};

// Query parameters for calendar month API
#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub month: u32,
    pub year: u32,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/month", get(get_calendar_month))
        .route("/current-date", get(get_current_date))
        .route("/focus-date", get(get_focus_date).post(set_focus_date))
        .route("/focus-date/previous", post(navigate_previous_month))
        .route("/focus-date/next", post(navigate_next_month))
}

/// Get calendar month data with the appointments of each day
async fn get_calendar_month(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CalendarMonthQuery>,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/calendar/month - query: {:?}", query);

    let calendar = &state.calendar_service;
    let (start, end) = calendar.month_date_range(query.month, query.year)?;
    let appointments = state
        .appointment_service
        .list_appointments(RecordFilter::date_range(&start, &end))
        .await?
        .appointments;

    let calendar_month =
        calendar.generate_calendar_month(query.month, query.year, &appointments, calendar.today())?;
    Ok(Json(calendar_month))
}

/// Get current date information from the backend
async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    Json(state.calendar_service.get_current_date())
}

/// Get the current focus date for calendar navigation
async fn get_focus_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/focus-date");

    Json(state.calendar_service.get_focus_date())
}

/// Set the focus date for calendar navigation
async fn set_focus_date(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateCalendarFocusRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/calendar/focus-date - request: {:?}", request);

    let focus_date = state
        .calendar_service
        .set_focus_date(request.month, request.year)?;
    Ok(Json(focus_response("Calendario en", focus_date)))
}

/// Navigate to the previous month
async fn navigate_previous_month(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("POST /api/calendar/focus-date/previous");

    let focus_date = state.calendar_service.navigate_previous_month()?;
    Ok(Json(focus_response("Navegaste a", focus_date)))
}

/// Navigate to the next month
async fn navigate_next_month(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("POST /api/calendar/focus-date/next");

    let focus_date = state.calendar_service.navigate_next_month()?;
    Ok(Json(focus_response("Navegaste a", focus_date)))
}

fn focus_response(prefix: &str, focus_date: CalendarFocusDate) -> UpdateCalendarFocusResponse {
    UpdateCalendarFocusResponse {
        success_message: format!("{} {} {}", prefix, month_name(focus_date.month), focus_date.year),
        focus_date,
    }
}
