use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::extract::ApiQuery;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BillingQuery {
    pub month: u32,
    pub year: u32,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(get_monthly_summary))
}

async fn get_monthly_summary(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BillingQuery>,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/billing/summary - query: {:?}", query);

    let summary = state
        .billing_service
        .monthly_summary(query.month, query.year)
        .await?;
    Ok(Json(summary))
}
