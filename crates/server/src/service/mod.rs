//! Application services. Each call authorizes the caller, validates input
//! and shapes API responses from repository records.

pub mod accounts;
pub mod catalog;
pub mod content;
pub mod enrollment;
pub mod error;
pub mod questions;

use std::str::FromStr;

use chrono::NaiveDateTime;
use lms_api_types::Paginated;
use lms_core::domain::{Actor, DomainError, PageRequest};

pub use accounts::AccountService;
pub use catalog::CatalogService;
pub use content::ContentService;
pub use enrollment::EnrollmentService;
pub use error::{ServiceError, ServiceResult};
pub use questions::QuestionService;

use crate::repository::Page;

/// Parses a client-supplied id, reporting `field` on failure.
pub fn parse_id<T>(field: &str, raw: &str) -> ServiceResult<T>
where
    T: FromStr<Err = uuid::Error>,
{
    T::from_str(raw.trim()).map_err(|_| ServiceError::Validation(format!("invalid {field}: '{raw}'")))
}

pub(crate) fn authenticated(actor: Option<&Actor>) -> ServiceResult<&Actor> {
    actor.ok_or_else(|| DomainError::Unauthenticated.into())
}

pub(crate) fn paginated<T>(page: Page<T>, request: PageRequest) -> Paginated<T> {
    Paginated {
        count: page.total,
        page: request.page(),
        limit: request.limit(),
        results: page.items,
    }
}

pub(crate) fn format_timestamp(value: NaiveDateTime) -> String {
    value.and_utc().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::{ServiceError, format_timestamp, parse_id};
    use chrono::NaiveDate;
    use lms_core::domain::CourseId;

    #[test]
    fn parse_id_rejects_garbage() {
        let result = parse_id::<CourseId>("course_id", "not-a-uuid");
        assert!(matches!(result, Err(ServiceError::Validation(message)) if message.contains("course_id")));
    }

    #[test]
    fn parse_id_accepts_padded_uuid() {
        let id = CourseId::new();
        let parsed: CourseId = parse_id("course_id", &format!(" {id} ")).expect("valid id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn timestamps_are_rfc3339_utc() {
        let value = NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        assert_eq!(format_timestamp(value), "2026-10-18T09:30:00+00:00");
    }
}
