use crate::entity::user;
use crate::repository::{parse_stored_id, unless_duplicate};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use lms_core::domain::{Role, UserId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: Option<String>,
    pub created_at: NaiveDateTime,
}

impl UserRecord {
    /// First and last name joined by a space, or the username when both are
    /// empty.
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `None` when the username or email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<Option<UserRecord>>;
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
    async fn find_many(&self, user_ids: &[UserId]) -> Result<Vec<UserRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_role(code: i16) -> Result<Role> {
        match code {
            0 => Ok(Role::Admin),
            1 => Ok(Role::Teacher),
            2 => Ok(Role::Student),
            _ => Err(anyhow!("invalid user.role code from database: {code}")),
        }
    }

    fn map_role_code(role: Role) -> i16 {
        match role {
            Role::Admin => 0,
            Role::Teacher => 1,
            Role::Student => 2,
        }
    }

    fn map_model(model: user::Model) -> Result<UserRecord> {
        Ok(UserRecord {
            id: parse_stored_id("user.id", &model.id)?,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            role: Self::map_role(model.role)?,
            first_name: model.first_name,
            last_name: model.last_name,
            mobile_no: model.mobile_no,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<Option<UserRecord>> {
        let id = UserId::new();

        let active_model = user::ActiveModel {
            id: Set(id.to_string()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(Self::map_role_code(new_user.role)),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            mobile_no: Set(new_user.mobile_no),
            ..Default::default()
        };

        unless_duplicate(active_model.insert(&self.db).await)?
            .map(Self::map_model)
            .transpose()
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        let model = user::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn find_many(&self, user_ids: &[UserId]) -> Result<Vec<UserRecord>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids.iter().map(ToString::to_string)))
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
