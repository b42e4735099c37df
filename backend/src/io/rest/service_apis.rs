//! # REST API for the Service Catalog (Servicios)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;
use shared::{CreateServiceRequest, UpdateServiceRequest};

#[derive(Debug, Deserialize, Default)]
pub struct ServiceListQuery {
    #[serde(default)]
    pub active_only: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route(
            "/:id",
            get(get_service).put(update_service).delete(delete_service),
        )
        .route("/:id/toggle", post(toggle_service))
}

async fn list_services(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ServiceListQuery>,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/services - query: {:?}", query);

    let response = state.catalog_service.list_services(query.active_only).await?;
    Ok(Json(response))
}

async fn create_service(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateServiceRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/services - request: {:?}", request);

    let response = state.catalog_service.create_service(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/services/{}", id);

    Ok(Json(state.catalog_service.get_service(id).await?))
}

async fn update_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateServiceRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("PUT /api/services/{} - request: {:?}", id, request);

    let response = state.catalog_service.update_service(id, request).await?;
    Ok(Json(response))
}

async fn toggle_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/services/{}/toggle", id);

    let response = state.catalog_service.toggle_active(id).await?;
    Ok(Json(response))
}

async fn delete_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    info!("DELETE /api/services/{}", id);

    state.catalog_service.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{json_request, read_json, test_app};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use shared::{CreateServiceRequest, ServiceListResponse, ServiceResponse};
    use tower::ServiceExt;

    fn create_body(name: &str, price: f64) -> CreateServiceRequest {
        CreateServiceRequest {
            name: name.to_string(),
            description: "Servicio a domicilio".to_string(),
            price,
            estimated_duration_minutes: 60,
            active: None,
        }
    }

    fn get(uri: &str) -> Result<Request<Body>, axum::http::Error> {
        Request::builder().uri(uri).method(Method::GET).body(Body::empty())
    }

    #[tokio::test]
    async fn test_create_toggle_and_filter() -> Result<(), Box<dyn std::error::Error>> {
        let (app, _) = test_app().await?;

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/services", &create_body("Carga de gas", 700.0))?)
            .await?;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: ServiceResponse = read_json(response).await?;

        app.clone()
            .oneshot(json_request(Method::POST, "/api/services", &create_body("Limpieza", 400.0))?)
            .await?;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/services/{}/toggle", created.service.id))
                    .method(Method::POST)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        let toggled: ServiceResponse = read_json(response).await?;
        assert!(!toggled.service.active);

        let all: ServiceListResponse = read_json(app.clone().oneshot(get("/api/services")?).await?).await?;
        assert_eq!(all.services.len(), 2);

        let active: ServiceListResponse =
            read_json(app.oneshot(get("/api/services?active_only=true")?).await?).await?;
        assert_eq!(active.services.len(), 1);
        assert_eq!(active.services[0].name, "Limpieza");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_price_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
        let (app, _) = test_app().await?;

        let response = app
            .oneshot(json_request(Method::POST, "/api/services", &create_body("Revisión", -10.0))?)
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_service() -> Result<(), Box<dyn std::error::Error>> {
        let (app, _) = test_app().await?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/services/99")
                    .method(Method::DELETE)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
