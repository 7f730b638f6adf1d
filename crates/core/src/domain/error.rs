use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid progress: {0}. progress must be in [0, 100]")]
    InvalidProgress(u16),

    #[error("course has no lessons, progress cannot be computed")]
    EmptyCourse,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("title is too long: {0} characters (max {max})", max = super::Title::MAX_LEN)]
    InvalidTitleLength(usize),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown material type: {0}")]
    UnknownMaterialKind(String),

    #[error("page must be at least 1 and within range")]
    InvalidPage,

    #[error("limit must be at least 1")]
    InvalidLimit,

    #[error("authentication credentials were not provided")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(&'static str),
}
