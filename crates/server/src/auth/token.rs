use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use lms_core::domain::{Actor, Role, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl Claims {
    pub fn actor(&self) -> Result<Actor, TokenError> {
        let id: UserId = self.sub.parse().map_err(|_| TokenError::Invalid)?;
        let role: Role = self.role.parse().map_err(|_| TokenError::Invalid)?;
        Ok(Actor::new(id, role))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is invalid")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("expected a {expected} token")]
    WrongType { expected: &'static str },
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and verifies HS256 access/refresh tokens.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenManager {
    pub fn new(secret: &str, access_token_minutes: i64, refresh_token_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_token_minutes),
            refresh_ttl: Duration::days(refresh_token_days),
        }
    }

    pub fn issue_pair(&self, actor: Actor, username: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.issue(actor, username, TokenType::Access)?,
            refresh: self.issue(actor, username, TokenType::Refresh)?,
        })
    }

    pub fn issue(
        &self,
        actor: Actor,
        username: &str,
        token_type: TokenType,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: actor.id.to_string(),
            username: username.to_string(),
            role: actor.role.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.as_str().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?
            .claims;

        if claims.token_type != expected.as_str() {
            return Err(TokenError::WrongType {
                expected: expected.as_str(),
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenError, TokenManager, TokenType};
    use lms_core::domain::{Actor, Role, UserId};

    fn manager() -> TokenManager {
        TokenManager::new("unit-test-secret-with-enough-bytes", 60, 7)
    }

    #[test]
    fn access_token_round_trips_actor() {
        let actor = Actor::new(UserId::new(), Role::Teacher);
        let pair = manager().issue_pair(actor, "grace").expect("issue");

        let claims = manager()
            .verify(&pair.access, TokenType::Access)
            .expect("access token should verify");

        assert_eq!(claims.username, "grace");
        assert_eq!(claims.actor(), Ok(actor));
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let actor = Actor::new(UserId::new(), Role::Student);
        let pair = manager().issue_pair(actor, "alan").expect("issue");

        assert_eq!(
            manager().verify(&pair.refresh, TokenType::Access),
            Err(TokenError::WrongType { expected: "access" })
        );
        assert!(manager().verify(&pair.refresh, TokenType::Refresh).is_ok());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let actor = Actor::new(UserId::new(), Role::Admin);
        let other = TokenManager::new("a-completely-different-secret", 60, 7);
        let token = other
            .issue(actor, "mallory", TokenType::Access)
            .expect("issue");

        assert_eq!(
            manager().verify(&token, TokenType::Access),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let actor = Actor::new(UserId::new(), Role::Student);
        let short_lived = TokenManager::new("unit-test-secret-with-enough-bytes", -5, 7);
        let token = short_lived
            .issue(actor, "old", TokenType::Access)
            .expect("issue");

        assert_eq!(
            manager().verify(&token, TokenType::Access),
            Err(TokenError::Expired)
        );
    }
}
