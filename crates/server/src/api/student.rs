//! 学生 API 路由：选课、完成课时与学习进度。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use lms_api_types::{
    CompleteLessonRequest, CompleteLessonResponse, EnrollRequest, EnrollmentResponse, Paginated,
    ProgressResponse,
};

use super::error::ApiError;
use super::extract::{ApiJson, CurrentUser, ListParams};
use super::state::AppState;

/// 创建学生 API 路由。
pub fn create_student_router() -> Router<Arc<AppState>> {
    Router::new()
        // 已选课程
        .route("/api/student/courses", get(list_enrollments))
        // 选课
        .route("/api/student/enroll", post(enroll))
        // 完成课时
        .route("/api/student/complete-lesson", post(complete_lesson))
        .route("/api/student/lesson-complete", post(complete_lesson))
        // 课程进度
        .route("/api/student/progress/{course_id}", get(progress))
        // 已完成课时
        .route(
            "/api/student/completed-lessons/{course_id}",
            get(completed_lessons),
        )
}

async fn list_enrollments(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    params: ListParams,
) -> Result<Json<Paginated<EnrollmentResponse>>, ApiError> {
    let page = params.page(&state)?;
    Ok(Json(
        state.enrollment.list_enrollments(user.actor(), page).await?,
    ))
}

/// 选课。重复选课返回 409。
async fn enroll(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(request): ApiJson<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let enrollment = state.enrollment.enroll(user.actor(), request).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// 标记课时完成并返回最新进度；重复完成不会改变进度。
async fn complete_lesson(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CompleteLessonRequest>,
) -> Result<Json<CompleteLessonResponse>, ApiError> {
    let result = state
        .enrollment
        .mark_lesson_complete(user.actor(), request)
        .await?;
    Ok(Json(result))
}

/// 查询课程进度；未选课时返回 0。
async fn progress(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(course_id): Path<String>,
) -> Result<Json<ProgressResponse>, ApiError> {
    Ok(Json(
        state.enrollment.get_progress(user.actor(), &course_id).await?,
    ))
}

async fn completed_lessons(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let ids = state
        .enrollment
        .list_completed_lesson_ids(user.actor(), &course_id)
        .await?;
    Ok(Json(ids))
}
