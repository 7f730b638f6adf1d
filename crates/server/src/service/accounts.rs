use std::sync::Arc;

use lms_api_types::{RefreshRequest, RegisterRequest, TokenPairResponse, TokenRequest, UserResponse};
use lms_core::domain::{Action, Actor, Role, authorize};
use tracing::{info, warn};

use super::{ServiceError, ServiceResult, authenticated};
use crate::auth::{PasswordManager, TokenManager, TokenPair, TokenType};
use crate::config::AdminSeed;
use crate::repository::{NewUser, UserRecord, UserRepository};

pub const MIN_PASSWORD_LEN: usize = 8;

const BAD_CREDENTIALS: &str = "no active account found with the given credentials";

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordManager,
    tokens: TokenManager,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: PasswordManager,
        tokens: TokenManager,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();

        if username.is_empty() {
            return Err(ServiceError::Validation("username must not be empty".to_string()));
        }
        if !email.contains('@') {
            return Err(ServiceError::Validation(format!("invalid email address: '{email}'")));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let role = match request.role.as_deref() {
            Some(raw) => raw.parse::<Role>()?,
            None => Role::default(),
        };
        if !role.is_self_assignable() {
            return Err(ServiceError::Validation(format!(
                "role '{role}' cannot be chosen at registration"
            )));
        }

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(ServiceError::Conflict(
                "a user with that username already exists".to_string(),
            ));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict(
                "a user with that email already exists".to_string(),
            ));
        }

        let password_hash = self.passwords.hash(request.password).await?;
        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
                role,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                mobile_no: request.mobile_no.filter(|m| !m.trim().is_empty()),
            })
            .await?
            .ok_or_else(|| {
                ServiceError::Conflict(
                    "a user with that username or email already exists".to_string(),
                )
            })?;

        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user_response(user))
    }

    pub async fn obtain_token(&self, request: TokenRequest) -> ServiceResult<TokenPairResponse> {
        let Some(user) = self.users.find_by_username(request.username.trim()).await? else {
            return Err(ServiceError::Unauthorized(BAD_CREDENTIALS.to_string()));
        };

        let valid = self
            .passwords
            .verify(request.password, user.password_hash.clone())
            .await?;
        if !valid {
            warn!(username = %user.username, "rejected login with wrong password");
            return Err(ServiceError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        let pair = self
            .tokens
            .issue_pair(Actor::new(user.id, user.role), &user.username)?;
        info!(user_id = %user.id, "issued token pair");
        Ok(pair_response(pair))
    }

    /// Exchanges a refresh token for a new pair. The role is re-read from the
    /// store so role changes take effect on refresh.
    pub async fn refresh_token(&self, request: RefreshRequest) -> ServiceResult<TokenPairResponse> {
        let claims = self.tokens.verify(&request.refresh, TokenType::Refresh)?;
        let actor = claims.actor()?;

        let Some(user) = self.users.find_by_id(actor.id).await? else {
            return Err(ServiceError::Unauthorized("user no longer exists".to_string()));
        };

        let pair = self
            .tokens
            .issue_pair(Actor::new(user.id, user.role), &user.username)?;
        Ok(pair_response(pair))
    }

    /// Resolves a bearer access token to the caller.
    pub fn authenticate(&self, access_token: &str) -> ServiceResult<Actor> {
        let claims = self.tokens.verify(access_token, TokenType::Access)?;
        Ok(claims.actor()?)
    }

    pub async fn profile(&self, actor: Option<&Actor>) -> ServiceResult<Vec<UserResponse>> {
        let actor = authenticated(actor)?;
        authorize(Some(actor), Action::ViewOwnProfile)?;

        let user = self
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;

        Ok(vec![user_response(user)])
    }

    /// Creates the configured admin account unless the username is taken.
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, seed: &AdminSeed) -> ServiceResult<bool> {
        if let Some(existing) = self.users.find_by_username(&seed.username).await? {
            if existing.role != Role::Admin {
                warn!(
                    username = %existing.username,
                    role = %existing.role,
                    "configured admin username belongs to a non-admin account"
                );
            }
            return Ok(false);
        }

        let password_hash = self.passwords.hash(seed.password.clone()).await?;
        let Some(user) = self
            .users
            .create(NewUser {
                username: seed.username.clone(),
                email: seed.email.clone(),
                password_hash,
                role: Role::Admin,
                first_name: String::new(),
                last_name: String::new(),
                mobile_no: None,
            })
            .await?
        else {
            warn!(username = %seed.username, "admin account was created concurrently");
            return Ok(false);
        };

        info!(user_id = %user.id, username = %user.username, "created admin account");
        Ok(true)
    }
}

fn user_response(user: UserRecord) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        role: user.role.to_string(),
        first_name: user.first_name,
        last_name: user.last_name,
        mobile_no: user.mobile_no,
    }
}

fn pair_response(pair: TokenPair) -> TokenPairResponse {
    TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }
}
