use crate::entity::question_answer;
use crate::repository::{Page, parse_stored_id};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use lms_core::domain::{CourseId, LessonId, PageRequest, QuestionId, UserId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

#[derive(Debug, Clone)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub course_id: CourseId,
    pub lesson_id: Option<LessonId>,
    pub author_id: UserId,
    pub question: String,
    pub answer: Option<String>,
    pub answered_by: Option<UserId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub course_id: CourseId,
    pub lesson_id: Option<LessonId>,
    pub author_id: UserId,
    pub question: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionChanges {
    pub question: Option<String>,
    /// Answer text and the user who wrote it.
    pub answer: Option<(String, UserId)>,
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, new_question: NewQuestion) -> Result<QuestionRecord>;
    async fn find_by_id(&self, question_id: QuestionId) -> Result<Option<QuestionRecord>>;
    async fn list(
        &self,
        course_id: Option<CourseId>,
        page: PageRequest,
    ) -> Result<Page<QuestionRecord>>;
    async fn update(
        &self,
        question_id: QuestionId,
        changes: QuestionChanges,
    ) -> Result<Option<QuestionRecord>>;
    async fn delete(&self, question_id: QuestionId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmQuestionRepository {
    db: DatabaseConnection,
}

impl SeaOrmQuestionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: question_answer::Model) -> Result<QuestionRecord> {
        let lesson_id = model
            .lesson_id
            .as_deref()
            .map(|raw| parse_stored_id("question_answer.lesson_id", raw))
            .transpose()?;
        let answered_by = model
            .answered_by
            .as_deref()
            .map(|raw| parse_stored_id("question_answer.answered_by", raw))
            .transpose()?;

        Ok(QuestionRecord {
            id: parse_stored_id("question_answer.id", &model.id)?,
            course_id: parse_stored_id("question_answer.course_id", &model.course_id)?,
            lesson_id,
            author_id: parse_stored_id("question_answer.author_id", &model.author_id)?,
            question: model.question,
            answer: model.answer,
            answered_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait]
impl QuestionRepository for SeaOrmQuestionRepository {
    async fn create(&self, new_question: NewQuestion) -> Result<QuestionRecord> {
        let id = QuestionId::new();

        let active_model = question_answer::ActiveModel {
            id: Set(id.to_string()),
            course_id: Set(new_question.course_id.to_string()),
            lesson_id: Set(new_question.lesson_id.map(|id| id.to_string())),
            author_id: Set(new_question.author_id.to_string()),
            question: Set(new_question.question),
            answer: Set(None),
            answered_by: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, question_id: QuestionId) -> Result<Option<QuestionRecord>> {
        let model = question_answer::Entity::find_by_id(question_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list(
        &self,
        course_id: Option<CourseId>,
        page: PageRequest,
    ) -> Result<Page<QuestionRecord>> {
        let mut query = question_answer::Entity::find();
        if let Some(course_id) = course_id {
            query = query.filter(question_answer::Column::CourseId.eq(course_id.to_string()));
        }

        let paginator = query
            .order_by_desc(question_answer::Column::CreatedAt)
            .order_by_asc(question_answer::Column::Id)
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

    async fn update(
        &self,
        question_id: QuestionId,
        changes: QuestionChanges,
    ) -> Result<Option<QuestionRecord>> {
        let Some(model) = question_answer::Entity::find_by_id(question_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: question_answer::ActiveModel = model.into();
        if let Some(question) = changes.question {
            active_model.question = Set(question);
        }
        if let Some((answer, answered_by)) = changes.answer {
            active_model.answer = Set(Some(answer));
            active_model.answered_by = Set(Some(answered_by.to_string()));
        }
        active_model.updated_at = Set(Utc::now().naive_utc());

        let updated = active_model.update(&self.db).await?;
        Self::map_model(updated).map(Some)
    }

    async fn delete(&self, question_id: QuestionId) -> Result<bool> {
        let result = question_answer::Entity::delete_by_id(question_id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
