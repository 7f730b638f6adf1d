use super::DomainError;

/// Server-side limits for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// A 1-based page request with the limit already clamped to the server cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub fn new(
        page: Option<u64>,
        limit: Option<u64>,
        settings: PageSettings,
    ) -> Result<Self, DomainError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(DomainError::InvalidPage);
        }

        let limit = limit.unwrap_or(settings.default_limit);
        if limit == 0 {
            return Err(DomainError::InvalidLimit);
        }

        let limit = limit.min(settings.max_limit);

        // The row offset must fit the database's signed 64-bit OFFSET.
        (page - 1)
            .checked_mul(limit)
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or(DomainError::InvalidPage)?;

        Ok(Self { page, limit })
    }

    pub fn page(self) -> u64 {
        self.page
    }

    pub fn limit(self) -> u64 {
        self.limit
    }

    /// Zero-based page index.
    pub fn index(self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PageSettings::default().default_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageRequest, PageSettings};
    use crate::domain::DomainError;

    #[test]
    fn defaults_apply_when_query_is_empty() {
        let request = PageRequest::new(None, None, PageSettings::default()).expect("defaults");

        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 10);
        assert_eq!(request.index(), 0);
    }

    #[test]
    fn client_limit_is_capped() {
        let request =
            PageRequest::new(Some(3), Some(500), PageSettings::default()).expect("valid request");

        assert_eq!(request.page(), 3);
        assert_eq!(request.limit(), 100);
    }

    #[test]
    fn zero_page_and_limit_are_rejected() {
        let settings = PageSettings::default();

        assert_eq!(
            PageRequest::new(Some(0), None, settings),
            Err(DomainError::InvalidPage)
        );
        assert_eq!(
            PageRequest::new(None, Some(0), settings),
            Err(DomainError::InvalidLimit)
        );
    }

    #[test]
    fn pages_past_the_addressable_offset_are_rejected() {
        let settings = PageSettings::default();

        assert_eq!(
            PageRequest::new(Some(u64::MAX), Some(10), settings),
            Err(DomainError::InvalidPage)
        );
        assert_eq!(
            PageRequest::new(Some(i64::MAX as u64), Some(2), settings),
            Err(DomainError::InvalidPage)
        );

        let last = PageRequest::new(Some(i64::MAX as u64 / 10 + 1), Some(10), settings)
            .expect("offset fits in i64");
        assert_eq!(last.index() * last.limit(), i64::MAX as u64 / 10 * 10);
    }
}
