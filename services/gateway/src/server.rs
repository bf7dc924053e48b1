//! HTTP adapter serving the mock gateway over axum

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{Dispatch, MockGateway, request::GatewayRequest};

/// Create the router: `/health` plus everything else offered to the gateway
pub fn create_router(gateway: Arc<MockGateway>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(intercept)
        .with_state(gateway)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "marketplace-gateway"
    }))
}

/// Forward any request to the gateway
async fn intercept(
    State(gateway): State<Arc<MockGateway>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = GatewayRequest {
        method,
        url: uri.to_string(),
        headers,
        body,
    };

    match gateway.handle(&request).await {
        Dispatch::Handled(reply) => reply.into_response(),
        Dispatch::Unhandled => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "unhandled request" })),
        )
            .into_response(),
    }
}
