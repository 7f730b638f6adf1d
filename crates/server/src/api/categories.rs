//! 课程分类 API 路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use lms_api_types::{CategoryRequest, CategoryResponse, Paginated};

use super::error::ApiError;
use super::extract::{ApiJson, CurrentUser, ListParams};
use super::state::AppState;

/// 创建分类 API 路由。
pub fn create_category_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    params: ListParams,
) -> Result<Json<Paginated<CategoryResponse>>, ApiError> {
    let page = params.page(&state)?;
    Ok(Json(state.catalog.list_categories(page).await?))
}

/// 创建分类，仅管理员可用。
async fn create_category(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state.catalog.create_category(user.actor(), request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    Ok(Json(state.catalog.get_category(&id).await?))
}

async fn update_category(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    Ok(Json(
        state
            .catalog
            .update_category(user.actor(), &id, request)
            .await?,
    ))
}

/// 删除分类；仍有课程引用时拒绝删除。
async fn delete_category(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_category(user.actor(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
