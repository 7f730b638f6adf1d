use crate::entity::material;
use crate::repository::{Page, parse_stored_id};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use lms_core::domain::{CourseId, MaterialId, MaterialKind, PageRequest, Title};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

#[derive(Debug, Clone)]
pub struct MaterialRecord {
    pub id: MaterialId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub kind: MaterialKind,
    pub file: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub course_id: CourseId,
    pub title: Title,
    pub description: String,
    pub kind: MaterialKind,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialChanges {
    pub title: Option<Title>,
    pub description: Option<String>,
    pub kind: Option<MaterialKind>,
    pub file: Option<String>,
}

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn create(&self, new_material: NewMaterial) -> Result<MaterialRecord>;
    async fn find_by_id(&self, material_id: MaterialId) -> Result<Option<MaterialRecord>>;
    async fn list(
        &self,
        course_id: Option<CourseId>,
        page: PageRequest,
    ) -> Result<Page<MaterialRecord>>;
    async fn update(
        &self,
        material_id: MaterialId,
        changes: MaterialChanges,
    ) -> Result<Option<MaterialRecord>>;
    async fn delete(&self, material_id: MaterialId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmMaterialRepository {
    db: DatabaseConnection,
}

impl SeaOrmMaterialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_kind(code: i16) -> Result<MaterialKind> {
        match code {
            0 => Ok(MaterialKind::Pdf),
            1 => Ok(MaterialKind::Video),
            2 => Ok(MaterialKind::Document),
            3 => Ok(MaterialKind::Link),
            4 => Ok(MaterialKind::Other),
            _ => Err(anyhow!("invalid material.file_type code from database: {code}")),
        }
    }

    fn map_kind_code(kind: MaterialKind) -> i16 {
        match kind {
            MaterialKind::Pdf => 0,
            MaterialKind::Video => 1,
            MaterialKind::Document => 2,
            MaterialKind::Link => 3,
            MaterialKind::Other => 4,
        }
    }

    fn map_model(model: material::Model) -> Result<MaterialRecord> {
        Ok(MaterialRecord {
            id: parse_stored_id("material.id", &model.id)?,
            course_id: parse_stored_id("material.course_id", &model.course_id)?,
            title: model.title,
            description: model.description,
            kind: Self::map_kind(model.file_type)?,
            file: model.file,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl MaterialRepository for SeaOrmMaterialRepository {
    async fn create(&self, new_material: NewMaterial) -> Result<MaterialRecord> {
        let id = MaterialId::new();

        let active_model = material::ActiveModel {
            id: Set(id.to_string()),
            course_id: Set(new_material.course_id.to_string()),
            title: Set(new_material.title.into_inner()),
            description: Set(new_material.description),
            file_type: Set(Self::map_kind_code(new_material.kind)),
            file: Set(new_material.file),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, material_id: MaterialId) -> Result<Option<MaterialRecord>> {
        let model = material::Entity::find_by_id(material_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list(
        &self,
        course_id: Option<CourseId>,
        page: PageRequest,
    ) -> Result<Page<MaterialRecord>> {
        let mut query = material::Entity::find();
        if let Some(course_id) = course_id {
            query = query.filter(material::Column::CourseId.eq(course_id.to_string()));
        }

        let paginator = query
            .order_by_asc(material::Column::CreatedAt)
            .order_by_asc(material::Column::Id)
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
        material_id: MaterialId,
        changes: MaterialChanges,
    ) -> Result<Option<MaterialRecord>> {
        let Some(model) = material::Entity::find_by_id(material_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: material::ActiveModel = model.clone().into();
        if let Some(title) = changes.title {
            active_model.title = Set(title.into_inner());
        }
        if let Some(description) = changes.description {
            active_model.description = Set(description);
        }
        if let Some(kind) = changes.kind {
            active_model.file_type = Set(Self::map_kind_code(kind));
        }
        if let Some(file) = changes.file {
            active_model.file = Set(Some(file));
        }

        if !active_model.is_changed() {
            return Self::map_model(model).map(Some);
        }

        let updated = active_model.update(&self.db).await?;
        Self::map_model(updated).map(Some)
    }

    async fn delete(&self, material_id: MaterialId) -> Result<bool> {
        let result = material::Entity::delete_by_id(material_id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
