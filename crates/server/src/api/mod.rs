//! API 路由模块。
//!
//! 所有业务接口挂在 `/api` 下，健康检查为 `/health`。

pub mod accounts;
pub mod categories;
pub mod courses;
pub mod error;
pub mod extract;
pub mod health;
pub mod lessons;
pub mod materials;
pub mod questions;
pub mod state;
pub mod student;
pub mod teacher;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub use error::ApiError;
pub use extract::CurrentUser;
pub use state::AppState;

/// 组装全部路由并挂载追踪与 CORS 中间件。
pub fn create_router(state: Arc<AppState>, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(health::create_health_router())
        .merge(accounts::create_account_router())
        .merge(categories::create_category_router())
        .merge(courses::create_course_router())
        .merge(lessons::create_lesson_router())
        .merge(materials::create_material_router())
        .merge(questions::create_question_router())
        .merge(teacher::create_teacher_router())
        .merge(student::create_student_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_allowed_origins))
}

/// 根据配置的来源构造 CORS 中间件，无效来源会被忽略。
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
