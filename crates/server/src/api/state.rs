//! 统一的应用状态。

use anyhow::Context;
use lms_core::domain::PageSettings;
use sea_orm::DatabaseConnection;
use tracing::warn;
use uuid::Uuid;

use crate::auth::{PasswordManager, TokenManager};
use crate::config::ServerConfig;
use crate::repository::Repositories;
use crate::service::{
    AccountService, CatalogService, ContentService, EnrollmentService, QuestionService,
};

/// 统一的应用状态，包含所有请求共享的服务。
#[derive(Clone)]
pub struct AppState {
    /// 注册、登录与令牌。
    pub accounts: AccountService,
    /// 分类与课程。
    pub catalog: CatalogService,
    /// 课时与资料。
    pub content: ContentService,
    /// 课程问答。
    pub questions: QuestionService,
    /// 选课与学习进度。
    pub enrollment: EnrollmentService,
    /// 列表分页限制。
    pub page_settings: PageSettings,
}

impl AppState {
    /// 根据数据库连接和服务配置创建应用状态。
    pub fn new(db: DatabaseConnection, config: &ServerConfig) -> anyhow::Result<Self> {
        let secret = match config.auth.jwt_secret.clone() {
            Some(secret) => secret,
            None => {
                warn!("no JWT secret configured, generating an ephemeral one; tokens will not survive a restart");
                format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
            }
        };

        let passwords = PasswordManager::new(config.auth.argon2)
            .context("failed to initialize password hasher")?;
        let tokens = TokenManager::new(
            &secret,
            config.auth.access_token_minutes,
            config.auth.refresh_token_days,
        );

        Ok(Self::from_parts(
            Repositories::sea_orm(db),
            passwords,
            tokens,
            config.page_settings(),
        ))
    }

    /// 由已构造的仓储与认证组件组装应用状态。
    pub fn from_parts(
        repos: Repositories,
        passwords: PasswordManager,
        tokens: TokenManager,
        page_settings: PageSettings,
    ) -> Self {
        Self {
            accounts: AccountService::new(repos.users.clone(), passwords, tokens),
            catalog: CatalogService::new(
                repos.categories.clone(),
                repos.courses.clone(),
                repos.lessons.clone(),
                repos.users.clone(),
            ),
            content: ContentService::new(
                repos.courses.clone(),
                repos.lessons.clone(),
                repos.materials.clone(),
            ),
            questions: QuestionService::new(
                repos.questions.clone(),
                repos.courses.clone(),
                repos.lessons.clone(),
            ),
            enrollment: EnrollmentService::new(repos.courses, repos.lessons, repos.enrollments),
            page_settings,
        }
    }
}
