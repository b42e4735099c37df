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
    Router::new().route("/summary", get(get_summary))
}

async fn get_summary(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("GET /api/dashboard/summary");

    let today = state.calendar_service.today();
    let summary = state.dashboard_service.summary(today).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{json_request, read_json, test_app};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use shared::{AppointmentStatus, CreateAppointmentRequest, DashboardSummary};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_summary_counts_today() -> Result<(), Box<dyn std::error::Error>> {
        let (app, app_state) = test_app().await?;
        let today = app_state.calendar_service.today().format("%Y-%m-%d").to_string();

        let body = CreateAppointmentRequest {
            date: today,
            time: "23:59".to_string(),
            client_name: "Clínica San Rafael".to_string(),
            service_name: "Diagnóstico eléctrico".to_string(),
            status: Some(AppointmentStatus::Pending),
        };
        app.clone()
            .oneshot(json_request(Method::POST, "/api/appointments", &body)?)
            .await?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard/summary")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let summary: DashboardSummary = read_json(response).await?;
        assert_eq!(summary.appointments_today, 1);
        assert_eq!(summary.new_clients_this_month, 1);
        assert_eq!(summary.upcoming_appointments.len(), 1);
        assert_eq!(summary.notices.len(), 1);

        Ok(())
    }
}
