//! Request extractors whose rejections become [`ApiError`] responses, so a
//! malformed body, query or path gets the same JSON error body as a failed
//! domain call.

use axum::extract::{FromRequest, FromRequestParts};

use crate::io::rest::error::ApiError;

/// `axum::Json` with an `ErrorResponse` body on rejection
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with an `ErrorResponse` body on rejection
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` with an `ErrorResponse` body on rejection
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
