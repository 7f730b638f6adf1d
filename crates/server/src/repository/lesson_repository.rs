use crate::entity::lesson;
use crate::repository::{Page, parse_stored_id};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use lms_core::domain::{CourseId, LessonId, PageRequest, Title};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct LessonRecord {
    pub id: LessonId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub video: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub course_id: CourseId,
    pub title: Title,
    pub description: String,
    pub video: String,
}

#[derive(Debug, Clone, Default)]
pub struct LessonChanges {
    pub title: Option<Title>,
    pub description: Option<String>,
    pub video: Option<String>,
}

#[async_trait]
pub trait LessonRepository: Send + Sync {
    async fn create(&self, new_lesson: NewLesson) -> Result<LessonRecord>;
    async fn find_by_id(&self, lesson_id: LessonId) -> Result<Option<LessonRecord>>;
    async fn list(
        &self,
        course_id: Option<CourseId>,
        page: PageRequest,
    ) -> Result<Page<LessonRecord>>;
    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<LessonRecord>>;
    async fn update(
        &self,
        lesson_id: LessonId,
        changes: LessonChanges,
    ) -> Result<Option<LessonRecord>>;
    async fn delete(&self, lesson_id: LessonId) -> Result<bool>;
    async fn count_by_courses(&self, course_ids: &[CourseId]) -> Result<HashMap<CourseId, u64>>;
}

#[derive(Clone)]
pub struct SeaOrmLessonRepository {
    db: DatabaseConnection,
}

impl SeaOrmLessonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: lesson::Model) -> Result<LessonRecord> {
        Ok(LessonRecord {
            id: parse_stored_id("lesson.id", &model.id)?,
            course_id: parse_stored_id("lesson.course_id", &model.course_id)?,
            title: model.title,
            description: model.description,
            video: model.video,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl LessonRepository for SeaOrmLessonRepository {
    async fn create(&self, new_lesson: NewLesson) -> Result<LessonRecord> {
        let id = LessonId::new();

        let active_model = lesson::ActiveModel {
            id: Set(id.to_string()),
            course_id: Set(new_lesson.course_id.to_string()),
            title: Set(new_lesson.title.into_inner()),
            description: Set(new_lesson.description),
            video: Set(new_lesson.video),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, lesson_id: LessonId) -> Result<Option<LessonRecord>> {
        let model = lesson::Entity::find_by_id(lesson_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list(
        &self,
        course_id: Option<CourseId>,
        page: PageRequest,
    ) -> Result<Page<LessonRecord>> {
        let mut query = lesson::Entity::find();
        if let Some(course_id) = course_id {
            query = query.filter(lesson::Column::CourseId.eq(course_id.to_string()));
        }

        let paginator = query
            .order_by_asc(lesson::Column::CreatedAt)
            .order_by_asc(lesson::Column::Id)
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

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<LessonRecord>> {
        let models = lesson::Entity::find()
            .filter(lesson::Column::CourseId.eq(course_id.to_string()))
            .order_by_asc(lesson::Column::CreatedAt)
            .order_by_asc(lesson::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn update(
        &self,
        lesson_id: LessonId,
        changes: LessonChanges,
    ) -> Result<Option<LessonRecord>> {
        let Some(model) = lesson::Entity::find_by_id(lesson_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: lesson::ActiveModel = model.clone().into();
        if let Some(title) = changes.title {
            active_model.title = Set(title.into_inner());
        }
        if let Some(description) = changes.description {
            active_model.description = Set(description);
        }
        if let Some(video) = changes.video {
            active_model.video = Set(video);
        }

        if !active_model.is_changed() {
            return Self::map_model(model).map(Some);
        }

        let updated = active_model.update(&self.db).await?;
        Self::map_model(updated).map(Some)
    }

    async fn delete(&self, lesson_id: LessonId) -> Result<bool> {
        let result = lesson::Entity::delete_by_id(lesson_id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn count_by_courses(&self, course_ids: &[CourseId]) -> Result<HashMap<CourseId, u64>> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(String, i64)> = lesson::Entity::find()
            .select_only()
            .column(lesson::Column::CourseId)
            .column_as(Expr::col(lesson::Column::Id).count(), "lesson_count")
            .filter(lesson::Column::CourseId.is_in(course_ids.iter().map(ToString::to_string)))
            .group_by(lesson::Column::CourseId)
            .into_tuple()
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(course_id, count)| {
                let course_id = parse_stored_id("lesson.course_id", &course_id)?;
                Ok((course_id, u64::try_from(count)?))
            })
            .collect()
    }
}
