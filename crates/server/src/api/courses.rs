//! 课程 API 路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use lms_api_types::{
    CourseResponse, CreateCourseRequest, LessonResponse, Paginated, UpdateCourseRequest,
};

use super::error::ApiError;
use super::extract::{ApiJson, CurrentUser, ListParams};
use super::state::AppState;

/// 创建课程 API 路由。
pub fn create_course_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        // 课程下的全部课时
        .route("/api/courses/{id}/lessons", get(course_lessons))
}

/// 分页列出课程，可按 `category_id` 过滤。
async fn list_courses(
    State(state): State<Arc<AppState>>,
    params: ListParams,
) -> Result<Json<Paginated<CourseResponse>>, ApiError> {
    let page = params.page(&state)?;
    let courses = state
        .catalog
        .list_courses(params.0.category_id.as_deref(), page)
        .await?;
    Ok(Json(courses))
}

/// 创建课程，讲师固定为当前教师。
async fn create_course(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let course = state.catalog.create_course(user.actor(), request).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CourseResponse>, ApiError> {
    Ok(Json(state.catalog.get_course(&id).await?))
}

async fn update_course(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = state
        .catalog
        .update_course(user.actor(), &id, request)
        .await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_course(user.actor(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn course_lessons(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LessonResponse>>, ApiError> {
    Ok(Json(state.content.course_lessons(&id).await?))
}
