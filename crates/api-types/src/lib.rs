//! Shared request/response types used by API-facing crates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub page: u64,
    pub limit: u64,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub course_id: Option<String>,
    pub category_id: Option<String>,
}

// ---- accounts ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub mobile_no: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

// ---- categories ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub title: String,
}

// ---- courses ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial course update. The instructor is never client-writable, so it has
/// no field here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub category: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub duration: Option<String>,
    pub banner: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorSummary {
    pub id: String,
    pub username: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub duration: String,
    pub banner: Option<String>,
    pub is_active: bool,
    pub category: CategoryResponse,
    pub instructor: InstructorSummary,
    pub lessons: u64,
    pub created_at: String,
    pub updated_at: String,
}

// ---- lessons ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLessonRequest {
    pub course: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonResponse {
    pub id: String,
    pub course: String,
    pub title: String,
    pub description: String,
    pub video: String,
    pub created_at: String,
}

// ---- materials ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMaterialRequest {
    pub course: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub file_type: String,
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_type: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialResponse {
    pub id: String,
    pub course: String,
    pub title: String,
    pub description: String,
    pub file_type: String,
    pub file: Option<String>,
    pub created_at: String,
}

// ---- questions ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    pub course: String,
    #[serde(default)]
    pub lesson: Option<String>,
    pub question: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: String,
    pub course: String,
    pub lesson: Option<String>,
    pub author: String,
    pub question: String,
    pub answer: Option<String>,
    pub answered_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

// ---- enrollment and progress ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub course_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub id: String,
    pub course: String,
    pub course_title: String,
    pub progress: u8,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteLessonRequest {
    pub lesson_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteLessonResponse {
    pub progress: u8,
    pub is_completed: bool,
    pub already_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub progress_percent: u8,
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_ok_payload() {
        let response = HealthCheckResponse::ok();
        assert_eq!(response.status, "ok");
    }

    #[test]
    fn register_request_defaults_optional_fields() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"username": "ada", "email": "ada@example.com", "password": "hunter22!"}"#,
        )
        .expect("deserialize register request");

        assert_eq!(request.role, None);
        assert_eq!(request.first_name, "");
        assert_eq!(request.mobile_no, None);
    }

    #[test]
    fn course_update_ignores_instructor_field() {
        let request: UpdateCourseRequest =
            serde_json::from_str(r#"{"title": "New title", "instructor": "someone-else"}"#)
                .expect("unknown fields are ignored");

        assert_eq!(request.title.as_deref(), Some("New title"));
        assert_eq!(request.category, None);
    }

    #[test]
    fn paginated_payload_shape() {
        let page = Paginated {
            count: 1,
            page: 1,
            limit: 10,
            results: vec![CategoryResponse {
                id: "c1".to_string(),
                title: "Programming".to_string(),
            }],
        };

        let json = serde_json::to_value(&page).expect("serialize page");

        assert_eq!(json["count"], 1);
        assert_eq!(json["results"][0]["title"], "Programming");
    }
}
