//! 账号与令牌 API 路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use lms_api_types::{RefreshRequest, RegisterRequest, TokenPairResponse, TokenRequest, UserResponse};

use super::error::ApiError;
use super::extract::{ApiJson, CurrentUser};
use super::state::AppState;

/// 创建账号 API 路由。
pub fn create_account_router() -> Router<Arc<AppState>> {
    Router::new()
        // 注册 / 当前用户信息
        .route("/api/users", get(profile).post(register))
        // 用户名密码换取令牌
        .route("/api/token", post(obtain_token))
        // 刷新令牌
        .route("/api/token/refresh", post(refresh_token))
}

/// 注册新用户，角色只能是学生或教师。
async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.accounts.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// 返回只包含当前用户的列表。
async fn profile(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    Ok(Json(state.accounts.profile(user.actor()).await?))
}

async fn obtain_token(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<TokenRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    Ok(Json(state.accounts.obtain_token(request).await?))
}

async fn refresh_token(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    Ok(Json(state.accounts.refresh_token(request).await?))
}
