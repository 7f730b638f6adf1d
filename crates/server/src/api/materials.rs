//! 课程资料 API 路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use lms_api_types::{CreateMaterialRequest, MaterialResponse, Paginated, UpdateMaterialRequest};

use super::error::ApiError;
use super::extract::{ApiJson, CurrentUser, ListParams};
use super::state::AppState;

/// 创建资料 API 路由。
pub fn create_material_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/materials", get(list_materials).post(create_material))
        .route(
            "/api/materials/{id}",
            get(get_material)
                .patch(update_material)
                .delete(delete_material),
        )
}

async fn list_materials(
    State(state): State<Arc<AppState>>,
    params: ListParams,
) -> Result<Json<Paginated<MaterialResponse>>, ApiError> {
    let page = params.page(&state)?;
    let materials = state
        .content
        .list_materials(params.0.course_id.as_deref(), page)
        .await?;
    Ok(Json(materials))
}

async fn create_material(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CreateMaterialRequest>,
) -> Result<(StatusCode, Json<MaterialResponse>), ApiError> {
    let material = state.content.create_material(user.actor(), request).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

async fn get_material(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MaterialResponse>, ApiError> {
    Ok(Json(state.content.get_material(&id).await?))
}

async fn update_material(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateMaterialRequest>,
) -> Result<Json<MaterialResponse>, ApiError> {
    let material = state
        .content
        .update_material(user.actor(), &id, request)
        .await?;
    Ok(Json(material))
}

async fn delete_material(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.content.delete_material(user.actor(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
