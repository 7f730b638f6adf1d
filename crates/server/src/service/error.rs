use lms_core::domain::DomainError;
use thiserror::Error;

use crate::auth::TokenError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidState(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{what} not found"))
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthenticated => Self::Unauthorized(err.to_string()),
            DomainError::Forbidden(message) => Self::Forbidden(message.to_string()),
            DomainError::EmptyCourse => Self::InvalidState(err.to_string()),
            // Progress values are computed server side, never supplied by clients.
            DomainError::InvalidProgress(_) => Self::Internal(anyhow::Error::new(err)),
            DomainError::EmptyTitle
            | DomainError::InvalidTitleLength(_)
            | DomainError::UnknownRole(_)
            | DomainError::UnknownMaterialKind(_)
            | DomainError::InvalidPage
            | DomainError::InvalidLimit => Self::Validation(err.to_string()),
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(message) => {
                Self::Internal(anyhow::anyhow!("failed to sign token: {message}"))
            }
            TokenError::Invalid | TokenError::Expired | TokenError::WrongType { .. } => {
                Self::Unauthorized(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::auth::TokenError;
    use lms_core::domain::DomainError;

    #[test]
    fn domain_errors_map_to_service_taxonomy() {
        assert!(matches!(
            ServiceError::from(DomainError::Unauthenticated),
            ServiceError::Unauthorized(_)
        ));
        assert!(matches!(
            ServiceError::from(DomainError::Forbidden("nope")),
            ServiceError::Forbidden(message) if message == "nope"
        ));
        assert!(matches!(
            ServiceError::from(DomainError::EmptyCourse),
            ServiceError::InvalidState(_)
        ));
        assert!(matches!(
            ServiceError::from(DomainError::EmptyTitle),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            ServiceError::from(DomainError::InvalidProgress(101)),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn token_errors_are_unauthorized_except_signing() {
        assert!(matches!(
            ServiceError::from(TokenError::Expired),
            ServiceError::Unauthorized(_)
        ));
        assert!(matches!(
            ServiceError::from(TokenError::Signing("bad key".to_string())),
            ServiceError::Internal(_)
        ));
    }
}
