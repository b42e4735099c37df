use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::io::rest::appointment_apis::AppointmentQuery;
use crate::io::rest::error::ApiResult;
use crate::io::rest::extract::ApiQuery;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_history))
}

/// Completed services, most recent first. Accepts the same filters as the
/// appointment listing.
async fn list_history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AppointmentQuery>,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/history - query: {:?}", query);

    let response = state.history_service.list_history(query.into()).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{read_json, test_app};
    use crate::storage::{ServiceRecordRepository, ServiceRecordStorage};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use shared::{ServiceRecord, ServiceRecordListResponse};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_history() -> Result<(), Box<dyn std::error::Error>> {
        let db = crate::storage::DbConnection::init_test().await?;
        let repo = ServiceRecordRepository::new(db.clone());
        for (date, price) in [("2025-05-01", 500.0), ("2025-05-09", 250.5)] {
            repo.store_record(&ServiceRecord {
                id: 0,
                date: date.to_string(),
                time: "10:00".to_string(),
                client_name: "Hotel Las Palmas".to_string(),
                service_name: "Limpieza de ductos".to_string(),
                duration_minutes: 180,
                price,
            })
            .await?;
        }
        let (app, _) = crate::io::rest::test_support::test_app_with_db(db);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/history")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let history: ServiceRecordListResponse = read_json(response).await?;
        assert_eq!(history.records.len(), 2);
        assert_eq!(history.records[0].date, "2025-05-09");
        assert_eq!(history.total_revenue, 750.5);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_history() -> Result<(), Box<dyn std::error::Error>> {
        let (app, _) = test_app().await?;

        let response = app
            .oneshot(Request::builder().uri("/api/history").body(Body::empty())?)
            .await?;
        let history: ServiceRecordListResponse = read_json(response).await?;
        assert!(history.records.is_empty());
        assert_eq!(history.total_revenue, 0.0);

        Ok(())
    }
}
