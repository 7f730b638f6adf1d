use super::DomainError;

/// Trimmed, non-empty display title shared by categories, courses, lessons
/// and materials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub const MAX_LEN: usize = 200;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(DomainError::EmptyTitle);
        }

        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(DomainError::InvalidTitleLength(len));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::Title;
    use crate::domain::DomainError;

    #[test]
    fn title_is_trimmed() {
        let title = Title::new("  Intro to Rust \n").expect("title should be valid");

        assert_eq!(title.as_str(), "Intro to Rust");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(Title::new("   "), Err(DomainError::EmptyTitle));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let raw = "x".repeat(Title::MAX_LEN + 1);

        assert_eq!(
            Title::new(raw),
            Err(DomainError::InvalidTitleLength(Title::MAX_LEN + 1))
        );
    }
}
