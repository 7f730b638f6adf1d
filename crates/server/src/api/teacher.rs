//! 教师 API 路由。

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use lms_api_types::{CourseResponse, Paginated};

use super::error::ApiError;
use super::extract::{CurrentUser, ListParams};
use super::state::AppState;

/// 创建教师 API 路由。
pub fn create_teacher_router() -> Router<Arc<AppState>> {
    Router::new().route("/api/teacher/courses", get(teacher_courses))
}

/// 当前教师讲授的课程。
async fn teacher_courses(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    params: ListParams,
) -> Result<Json<Paginated<CourseResponse>>, ApiError> {
    let page = params.page(&state)?;
    Ok(Json(
        state.catalog.teacher_courses(user.actor(), page).await?,
    ))
}
