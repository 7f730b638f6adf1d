//! 课程问答 API 路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use lms_api_types::{CreateQuestionRequest, Paginated, QuestionResponse, UpdateQuestionRequest};

use super::error::ApiError;
use super::extract::{ApiJson, CurrentUser, ListParams};
use super::state::AppState;

/// 创建问答 API 路由。
pub fn create_question_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/questions", get(list_questions).post(create_question))
        .route(
            "/api/questions/{id}",
            get(get_question)
                .patch(update_question)
                .delete(delete_question),
        )
}

async fn list_questions(
    State(state): State<Arc<AppState>>,
    params: ListParams,
) -> Result<Json<Paginated<QuestionResponse>>, ApiError> {
    let page = params.page(&state)?;
    let questions = state
        .questions
        .list(params.0.course_id.as_deref(), page)
        .await?;
    Ok(Json(questions))
}

async fn create_question(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let question = state.questions.create(user.actor(), request).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<QuestionResponse>, ApiError> {
    Ok(Json(state.questions.get(&id).await?))
}

/// 修改问题（作者）或回答问题（课程讲师）。
async fn update_question(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateQuestionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = state.questions.update(user.actor(), &id, request).await?;
    Ok(Json(question))
}

async fn delete_question(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.questions.delete(user.actor(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
