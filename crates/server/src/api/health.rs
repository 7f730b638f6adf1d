//! 健康检查。

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use lms_api_types::HealthCheckResponse;

use super::state::AppState;

/// 创建健康检查路由。
pub fn create_health_router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
