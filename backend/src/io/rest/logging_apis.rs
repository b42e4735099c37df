use axum::{response::Json, routing::post, Router};
use tracing::{debug, error, info, warn};

use crate::io::rest::extract::ApiJson;
use crate::AppState;
use shared::{LogEntry, LogResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Re-emit a frontend log line at the requested level
pub async fn log_message(ApiJson(request): ApiJson<LogEntry>) -> Json<LogResponse> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "info" => info!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message), // Default to info for unknown levels
    }

    Json(LogResponse { success: true })
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{json_request, read_json, test_app};
    use axum::http::{Method, StatusCode};
    use shared::{LogEntry, LogResponse};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_log_message() -> Result<(), Box<dyn std::error::Error>> {
        let (app, _) = test_app().await?;

        let entry = LogEntry {
            level: "WARN".to_string(),
            message: "Failed to load clients".to_string(),
            component: Some("ClientesView".to_string()),
        };
        let response = app
            .oneshot(json_request(Method::POST, "/api/logs", &entry)?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body: LogResponse = read_json(response).await?;
        assert!(body.success);

        Ok(())
    }
}
