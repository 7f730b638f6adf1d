use crate::entity::{enrollment, lesson, lesson_completion};
use crate::repository::{Page, parse_stored_id};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use lms_core::domain::{
    CompletionId, CourseId, EnrollmentId, LessonId, PageRequest, Progress, UserId,
};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

#[derive(Debug, Clone)]
pub struct EnrollmentRecord {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub progress: Progress,
    pub is_completed: bool,
    pub is_active: bool,
    pub enrolled_at: NaiveDateTime,
}

/// Result of recording a lesson completion.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    /// A new completion row was written and the enrollment recomputed.
    Recorded(EnrollmentRecord),
    /// The student had already completed the lesson; nothing changed. Carries
    /// the enrollment if there is one.
    AlreadyCompleted(Option<EnrollmentRecord>),
    NotEnrolled,
    EmptyCourse,
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Inserts a fresh enrollment. Returns `None` when one already exists for
    /// the pair.
    async fn create(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<EnrollmentRecord>>;
    async fn find(&self, user_id: UserId, course_id: CourseId)
    -> Result<Option<EnrollmentRecord>>;
    async fn list_active_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<EnrollmentRecord>>;
    /// Records that `student_id` finished `lesson_id` and recomputes the
    /// enrollment progress for `course_id` as one atomic unit.
    async fn record_completion(
        &self,
        student_id: UserId,
        lesson_id: LessonId,
        course_id: CourseId,
    ) -> Result<CompletionOutcome>;
    async fn completed_lesson_ids(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Vec<LessonId>>;
}

#[derive(Clone)]
pub struct SeaOrmEnrollmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmEnrollmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: enrollment::Model) -> Result<EnrollmentRecord> {
        let progress_u16 = u16::try_from(model.progress).map_err(|_| {
            anyhow!(
                "invalid enrollment.progress from database: {} (must be non-negative)",
                model.progress
            )
        })?;

        Ok(EnrollmentRecord {
            id: parse_stored_id("enrollment.id", &model.id)?,
            user_id: parse_stored_id("enrollment.user_id", &model.user_id)?,
            course_id: parse_stored_id("enrollment.course_id", &model.course_id)?,
            progress: Progress::new(progress_u16)?,
            is_completed: model.is_completed,
            is_active: model.is_active,
            enrolled_at: model.enrolled_at,
        })
    }
}

#[async_trait]
impl EnrollmentRepository for SeaOrmEnrollmentRepository {
    async fn create(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<EnrollmentRecord>> {
        let id = EnrollmentId::new();

        let active_model = enrollment::ActiveModel {
            id: Set(id.to_string()),
            user_id: Set(user_id.to_string()),
            course_id: Set(course_id.to_string()),
            progress: Set(i16::from(Progress::default().value())),
            is_completed: Set(false),
            is_active: Set(true),
            ..Default::default()
        };

        let inserted = enrollment::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([enrollment::Column::UserId, enrollment::Column::CourseId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if inserted == 0 {
            return Ok(None);
        }

        let model = enrollment::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .with_context(|| format!("enrollment {id} missing right after insert"))?;

        Self::map_model(model).map(Some)
    }

    async fn find(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<EnrollmentRecord>> {
        let model = enrollment::Entity::find()
            .filter(enrollment::Column::UserId.eq(user_id.to_string()))
            .filter(enrollment::Column::CourseId.eq(course_id.to_string()))
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list_active_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<EnrollmentRecord>> {
        let paginator = enrollment::Entity::find()
            .filter(enrollment::Column::UserId.eq(user_id.to_string()))
            .filter(enrollment::Column::IsActive.eq(true))
            .order_by_asc(enrollment::Column::EnrolledAt)
            .order_by_asc(enrollment::Column::Id)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        Ok(Page {
            items: models
                .into_iter()
                .map(Self::map_model)
                .collect::<Result<_>>()?,
            total,
        })
    }

    async fn record_completion(
        &self,
        student_id: UserId,
        lesson_id: LessonId,
        course_id: CourseId,
    ) -> Result<CompletionOutcome> {
        let txn = self.db.begin().await?;

        // Writing before any read claims the lock up front: the enrollment row
        // lock on Postgres, the database write lock on SQLite. A competing
        // completion then waits here instead of failing a later lock upgrade.
        enrollment::Entity::update_many()
            .col_expr(
                enrollment::Column::Progress,
                Expr::col(enrollment::Column::Progress).into(),
            )
            .filter(enrollment::Column::UserId.eq(student_id.to_string()))
            .filter(enrollment::Column::CourseId.eq(course_id.to_string()))
            .exec(&txn)
            .await?;

        let enrollment = enrollment::Entity::find()
            .filter(enrollment::Column::UserId.eq(student_id.to_string()))
            .filter(enrollment::Column::CourseId.eq(course_id.to_string()))
            .lock_exclusive()
            .one(&txn)
            .await?;

        let existing = lesson_completion::Entity::find()
            .filter(lesson_completion::Column::StudentId.eq(student_id.to_string()))
            .filter(lesson_completion::Column::LessonId.eq(lesson_id.to_string()))
            .one(&txn)
            .await?;

        if existing.is_some() {
            txn.commit().await?;
            let current = enrollment.map(Self::map_model).transpose()?;
            return Ok(CompletionOutcome::AlreadyCompleted(current));
        }

        let Some(enrollment) = enrollment else {
            txn.rollback().await?;
            return Ok(CompletionOutcome::NotEnrolled);
        };

        let total_lessons = lesson::Entity::find()
            .filter(lesson::Column::CourseId.eq(course_id.to_string()))
            .count(&txn)
            .await?;

        if total_lessons == 0 {
            txn.rollback().await?;
            return Ok(CompletionOutcome::EmptyCourse);
        }

        let completion = lesson_completion::ActiveModel {
            id: Set(CompletionId::new().to_string()),
            student_id: Set(student_id.to_string()),
            lesson_id: Set(lesson_id.to_string()),
            ..Default::default()
        };

        let inserted = lesson_completion::Entity::insert(completion)
            .on_conflict(
                OnConflict::columns([
                    lesson_completion::Column::StudentId,
                    lesson_completion::Column::LessonId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        if inserted == 0 {
            txn.commit().await?;
            let current = Self::map_model(enrollment)?;
            return Ok(CompletionOutcome::AlreadyCompleted(Some(current)));
        }

        let completed_lessons = lesson_completion::Entity::find()
            .inner_join(lesson::Entity)
            .filter(lesson_completion::Column::StudentId.eq(student_id.to_string()))
            .filter(lesson::Column::CourseId.eq(course_id.to_string()))
            .count(&txn)
            .await?;

        let progress = Progress::from_counts(completed_lessons, total_lessons)?;

        let mut active_model: enrollment::ActiveModel = enrollment.into();
        active_model.progress = Set(i16::from(progress.value()));
        active_model.is_completed = Set(progress.is_complete());

        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        Self::map_model(updated).map(CompletionOutcome::Recorded)
    }

    async fn completed_lesson_ids(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Vec<LessonId>> {
        let models = lesson_completion::Entity::find()
            .inner_join(lesson::Entity)
            .filter(lesson_completion::Column::StudentId.eq(student_id.to_string()))
            .filter(lesson::Column::CourseId.eq(course_id.to_string()))
            .order_by_asc(lesson_completion::Column::CompletedAt)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|model| parse_stored_id("lesson_completion.lesson_id", &model.lesson_id))
            .collect()
    }
}
