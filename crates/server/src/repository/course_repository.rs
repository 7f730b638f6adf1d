use crate::entity::course;
use crate::repository::{Page, parse_stored_id};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use lms_core::domain::{CategoryId, CourseId, PageRequest, Title, UserId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

#[derive(Debug, Clone)]
pub struct CourseRecord {
    pub id: CourseId,
    pub category_id: CategoryId,
    pub instructor_id: UserId,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub duration: String,
    pub banner: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub category_id: CategoryId,
    pub instructor_id: UserId,
    pub title: Title,
    pub description: String,
    pub price_cents: i64,
    pub duration: String,
    pub banner: Option<String>,
    pub is_active: bool,
}

/// Fields to overwrite on update; `None` leaves the column untouched. The
/// instructor is deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub category_id: Option<CategoryId>,
    pub title: Option<Title>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub duration: Option<String>,
    pub banner: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CourseFilter {
    pub category_id: Option<CategoryId>,
    pub instructor_id: Option<UserId>,
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, new_course: NewCourse) -> Result<CourseRecord>;
    async fn find_by_id(&self, course_id: CourseId) -> Result<Option<CourseRecord>>;
    async fn find_many(&self, course_ids: &[CourseId]) -> Result<Vec<CourseRecord>>;
    async fn list(&self, filter: CourseFilter, page: PageRequest) -> Result<Page<CourseRecord>>;
    async fn update(
        &self,
        course_id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<CourseRecord>>;
    async fn delete(&self, course_id: CourseId) -> Result<bool>;
    async fn count_by_category(&self, category_id: CategoryId) -> Result<u64>;
}

#[derive(Clone)]
pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: course::Model) -> Result<CourseRecord> {
        Ok(CourseRecord {
            id: parse_stored_id("course.id", &model.id)?,
            category_id: parse_stored_id("course.category_id", &model.category_id)?,
            instructor_id: parse_stored_id("course.instructor_id", &model.instructor_id)?,
            title: model.title,
            description: model.description,
            price_cents: model.price_cents,
            duration: model.duration,
            banner: model.banner,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn create(&self, new_course: NewCourse) -> Result<CourseRecord> {
        let id = CourseId::new();

        let active_model = course::ActiveModel {
            id: Set(id.to_string()),
            category_id: Set(new_course.category_id.to_string()),
            instructor_id: Set(new_course.instructor_id.to_string()),
            title: Set(new_course.title.into_inner()),
            description: Set(new_course.description),
            price_cents: Set(new_course.price_cents),
            duration: Set(new_course.duration),
            banner: Set(new_course.banner),
            is_active: Set(new_course.is_active),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, course_id: CourseId) -> Result<Option<CourseRecord>> {
        let model = course::Entity::find_by_id(course_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn find_many(&self, course_ids: &[CourseId]) -> Result<Vec<CourseRecord>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = course::Entity::find()
            .filter(course::Column::Id.is_in(course_ids.iter().map(ToString::to_string)))
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn list(&self, filter: CourseFilter, page: PageRequest) -> Result<Page<CourseRecord>> {
        let mut query = course::Entity::find();
        if let Some(category_id) = filter.category_id {
            query = query.filter(course::Column::CategoryId.eq(category_id.to_string()));
        }
        if let Some(instructor_id) = filter.instructor_id {
            query = query.filter(course::Column::InstructorId.eq(instructor_id.to_string()));
        }

        let paginator = query
            .order_by_desc(course::Column::CreatedAt)
            .order_by_asc(course::Column::Id)
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
        course_id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<CourseRecord>> {
        let Some(model) = course::Entity::find_by_id(course_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: course::ActiveModel = model.into();
        if let Some(category_id) = changes.category_id {
            active_model.category_id = Set(category_id.to_string());
        }
        if let Some(title) = changes.title {
            active_model.title = Set(title.into_inner());
        }
        if let Some(description) = changes.description {
            active_model.description = Set(description);
        }
        if let Some(price_cents) = changes.price_cents {
            active_model.price_cents = Set(price_cents);
        }
        if let Some(duration) = changes.duration {
            active_model.duration = Set(duration);
        }
        if let Some(banner) = changes.banner {
            active_model.banner = Set(Some(banner));
        }
        if let Some(is_active) = changes.is_active {
            active_model.is_active = Set(is_active);
        }
        active_model.updated_at = Set(Utc::now().naive_utc());

        let updated = active_model.update(&self.db).await?;
        Self::map_model(updated).map(Some)
    }

    async fn delete(&self, course_id: CourseId) -> Result<bool> {
        let result = course::Entity::delete_by_id(course_id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn count_by_category(&self, category_id: CategoryId) -> Result<u64> {
        let count = course::Entity::find()
            .filter(course::Column::CategoryId.eq(category_id.to_string()))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}
