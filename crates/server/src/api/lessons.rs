//! 课时 API 路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use lms_api_types::{CreateLessonRequest, LessonResponse, Paginated, UpdateLessonRequest};

use super::error::ApiError;
use super::extract::{ApiJson, CurrentUser, ListParams};
use super::state::AppState;

/// 创建课时 API 路由。
pub fn create_lesson_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/lessons", get(list_lessons).post(create_lesson))
        .route(
            "/api/lessons/{id}",
            get(get_lesson).patch(update_lesson).delete(delete_lesson),
        )
}

async fn list_lessons(
    State(state): State<Arc<AppState>>,
    params: ListParams,
) -> Result<Json<Paginated<LessonResponse>>, ApiError> {
    let page = params.page(&state)?;
    let lessons = state
        .content
        .list_lessons(params.0.course_id.as_deref(), page)
        .await?;
    Ok(Json(lessons))
}

async fn create_lesson(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), ApiError> {
    let lesson = state.content.create_lesson(user.actor(), request).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LessonResponse>, ApiError> {
    Ok(Json(state.content.get_lesson(&id).await?))
}

async fn update_lesson(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateLessonRequest>,
) -> Result<Json<LessonResponse>, ApiError> {
    let lesson = state
        .content
        .update_lesson(user.actor(), &id, request)
        .await?;
    Ok(Json(lesson))
}

async fn delete_lesson(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.content.delete_lesson(user.actor(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
