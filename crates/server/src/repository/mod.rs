pub mod category_repository;
pub mod course_repository;
pub mod enrollment_repository;
pub mod lesson_repository;
pub mod material_repository;
pub mod question_repository;
pub mod user_repository;

use anyhow::{Result, anyhow};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use std::str::FromStr;
use std::sync::Arc;

pub use category_repository::{CategoryRecord, CategoryRepository, SeaOrmCategoryRepository};
pub use course_repository::{
    CourseChanges, CourseFilter, CourseRecord, CourseRepository, NewCourse,
    SeaOrmCourseRepository,
};
pub use enrollment_repository::{
    CompletionOutcome, EnrollmentRecord, EnrollmentRepository, SeaOrmEnrollmentRepository,
};
pub use lesson_repository::{
    LessonChanges, LessonRecord, LessonRepository, NewLesson, SeaOrmLessonRepository,
};
pub use material_repository::{
    MaterialChanges, MaterialRecord, MaterialRepository, NewMaterial, SeaOrmMaterialRepository,
};
pub use question_repository::{
    NewQuestion, QuestionChanges, QuestionRecord, QuestionRepository, SeaOrmQuestionRepository,
};
pub use user_repository::{NewUser, SeaOrmUserRepository, UserRecord, UserRepository};

/// Every repository behind a trait object, sharing one connection pool.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub materials: Arc<dyn MaterialRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
}

impl Repositories {
    pub fn sea_orm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            categories: Arc::new(SeaOrmCategoryRepository::new(db.clone())),
            courses: Arc::new(SeaOrmCourseRepository::new(db.clone())),
            lessons: Arc::new(SeaOrmLessonRepository::new(db.clone())),
            materials: Arc::new(SeaOrmMaterialRepository::new(db.clone())),
            questions: Arc::new(SeaOrmQuestionRepository::new(db.clone())),
            enrollments: Arc::new(SeaOrmEnrollmentRepository::new(db)),
        }
    }
}

/// One page of rows plus the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Parses a UUID-backed id read from `column`.
pub(crate) fn parse_stored_id<T>(column: &str, raw: &str) -> Result<T>
where
    T: FromStr<Err = uuid::Error>,
{
    T::from_str(raw).map_err(|e| anyhow!("invalid {column} '{raw}' from database: {e}"))
}

/// Whether `err` came from a write rejected by a unique index.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>().is_some_and(|db_err| {
        matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    })
}

/// Turns a unique-index rejection into `Ok(None)`.
pub(crate) fn unless_duplicate<T>(result: std::result::Result<T, DbErr>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
