use crate::entity::category;
use crate::repository::{Page, parse_stored_id, unless_duplicate};
use anyhow::Result;
use async_trait::async_trait;
use lms_core::domain::{CategoryId, PageRequest, Title};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub title: String,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// `None` when another category already has the title.
    async fn create(&self, title: Title) -> Result<Option<CategoryRecord>>;
    async fn find_by_id(&self, category_id: CategoryId) -> Result<Option<CategoryRecord>>;
    async fn find_by_title(&self, title: &Title) -> Result<Option<CategoryRecord>>;
    async fn find_many(&self, category_ids: &[CategoryId]) -> Result<Vec<CategoryRecord>>;
    async fn list(&self, page: PageRequest) -> Result<Page<CategoryRecord>>;
    async fn rename(&self, category_id: CategoryId, title: Title)
    -> Result<Option<CategoryRecord>>;
    async fn delete(&self, category_id: CategoryId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: category::Model) -> Result<CategoryRecord> {
        Ok(CategoryRecord {
            id: parse_stored_id("category.id", &model.id)?,
            title: model.title,
        })
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn create(&self, title: Title) -> Result<Option<CategoryRecord>> {
        let id = CategoryId::new();

        let active_model = category::ActiveModel {
            id: Set(id.to_string()),
            title: Set(title.into_inner()),
        };

        unless_duplicate(active_model.insert(&self.db).await)?
            .map(Self::map_model)
            .transpose()
    }

    async fn find_by_id(&self, category_id: CategoryId) -> Result<Option<CategoryRecord>> {
        let model = category::Entity::find_by_id(category_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn find_by_title(&self, title: &Title) -> Result<Option<CategoryRecord>> {
        let model = category::Entity::find()
            .filter(category::Column::Title.eq(title.as_str()))
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn find_many(&self, category_ids: &[CategoryId]) -> Result<Vec<CategoryRecord>> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids.iter().map(ToString::to_string)))
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn list(&self, page: PageRequest) -> Result<Page<CategoryRecord>> {
        let paginator = category::Entity::find()
            .order_by_asc(category::Column::Title)
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

    async fn rename(
        &self,
        category_id: CategoryId,
        title: Title,
    ) -> Result<Option<CategoryRecord>> {
        let Some(model) = category::Entity::find_by_id(category_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: category::ActiveModel = model.into();
        active_model.title = Set(title.into_inner());

        let updated = active_model.update(&self.db).await?;
        Self::map_model(updated).map(Some)
    }

    async fn delete(&self, category_id: CategoryId) -> Result<bool> {
        let result = category::Entity::delete_by_id(category_id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
