#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use lms_api_types::{
    CategoryRequest, CategoryResponse, CourseResponse, CreateCourseRequest, CreateLessonRequest,
    LessonResponse, RegisterRequest, TokenRequest,
};
use lms_core::domain::{Actor, Role, UserId};
use lms_server::api::{self, AppState};
use lms_server::config::{AdminSeed, ServerConfig};
use lms_server::db;
use sea_orm::{ConnectOptions, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse-battery";

const TEST_CONFIG: &str = r#"
[auth]
jwt_secret = "integration-test-secret-0123456789abcdef"

[auth.argon2]
memory_cost_kib = 1024
time_cost = 1
parallelism = 1
"#;

pub struct TestApp {
    pub state: Arc<AppState>,
    pub db: DatabaseConnection,
    database_file: Option<PathBuf>,
}

/// Fresh in-memory SQLite database with all migrations applied.
pub async fn setup() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    setup_with(options, None).await
}

/// SQLite database in a temporary file behind a multi-connection pool, so
/// concurrent requests really run on separate connections.
pub async fn setup_file_backed() -> TestApp {
    let path = std::env::temp_dir().join(format!("lms-test-{}.sqlite", uuid::Uuid::new_v4()));
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options
        .max_connections(8)
        .min_connections(1)
        .sqlx_logging(false);

    setup_with(options, Some(path)).await
}

async fn setup_with(options: ConnectOptions, database_file: Option<PathBuf>) -> TestApp {
    let db = db::init_pool_and_migrate(options)
        .await
        .expect("database should migrate");
    let config = ServerConfig::from_str(TEST_CONFIG).expect("test config should parse");
    let state = AppState::new(db.clone(), &config).expect("state should build");

    TestApp {
        state: Arc::new(state),
        db,
        database_file,
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(path) = &self.database_file {
            for suffix in ["", "-wal", "-shm"] {
                let mut file = path.clone().into_os_string();
                file.push(suffix);
                let _ = std::fs::remove_file(file);
            }
        }
    }
}

impl TestApp {
    pub fn router(&self) -> Router {
        api::create_router(self.state.clone(), &[])
    }

    pub async fn register(&self, username: &str, role: Role) -> Actor {
        let user = self
            .state
            .accounts
            .register(RegisterRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: PASSWORD.to_string(),
                role: Some(role.to_string()),
                first_name: String::new(),
                last_name: String::new(),
                mobile_no: None,
            })
            .await
            .expect("user should register");

        let id: UserId = user.id.parse().expect("user id should be a uuid");
        Actor::new(id, role)
    }

    pub async fn admin(&self, username: &str) -> Actor {
        let seed = AdminSeed {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: PASSWORD.to_string(),
        };
        self.state
            .accounts
            .ensure_admin(&seed)
            .await
            .expect("admin should be seeded");

        let profile = self.profile_of(username).await;
        Actor::new(profile, Role::Admin)
    }

    async fn profile_of(&self, username: &str) -> UserId {
        let token = self.access_token(username).await;
        let actor = self
            .state
            .accounts
            .authenticate(&token)
            .expect("token should authenticate");
        actor.id
    }

    pub async fn access_token(&self, username: &str) -> String {
        self.state
            .accounts
            .obtain_token(TokenRequest {
                username: username.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("login should succeed")
            .access
    }

    pub async fn category(&self, admin: &Actor, title: &str) -> CategoryResponse {
        self.state
            .catalog
            .create_category(
                Some(admin),
                CategoryRequest {
                    title: title.to_string(),
                },
            )
            .await
            .expect("category should be created")
    }

    pub async fn course(&self, teacher: &Actor, category_id: &str, title: &str) -> CourseResponse {
        self.state
            .catalog
            .create_course(
                Some(teacher),
                CreateCourseRequest {
                    category: category_id.to_string(),
                    title: title.to_string(),
                    description: String::new(),
                    price_cents: 0,
                    duration: String::new(),
                    banner: None,
                    is_active: None,
                },
            )
            .await
            .expect("course should be created")
    }

    pub async fn lesson(&self, teacher: &Actor, course_id: &str, title: &str) -> LessonResponse {
        self.state
            .content
            .create_lesson(
                Some(teacher),
                CreateLessonRequest {
                    course: course_id.to_string(),
                    title: title.to_string(),
                    description: String::new(),
                    video: String::new(),
                },
            )
            .await
            .expect("lesson should be created")
    }

    /// Admin, category, teacher and a course owned by that teacher.
    pub async fn course_fixture(&self, teacher_name: &str) -> (Actor, CourseResponse) {
        let admin = self.admin("root").await;
        let category = self.category(&admin, "Programming").await;
        let teacher = self.register(teacher_name, Role::Teacher).await;
        let course = self.course(&teacher, &category.id, "Rust 101").await;
        (teacher, course)
    }
}

/// Sends one request through the router and returns the status and JSON body
/// (`Null` when the body is empty).
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = router
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, value)
}
