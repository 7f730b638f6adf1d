use super::DomainError;

/// Share of a course's lessons a student has completed, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Progress(u8);

impl Progress {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    pub fn new(value: u16) -> Result<Self, DomainError> {
        if value <= u16::from(Self::MAX) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::InvalidProgress(value))
        }
    }

    /// `floor(100 * completed / total)`, capped at 100.
    pub fn from_counts(completed: u64, total: u64) -> Result<Self, DomainError> {
        if total == 0 {
            return Err(DomainError::EmptyCourse);
        }

        let percent = completed.saturating_mul(100) / total;
        Ok(Self(percent.min(u64::from(Self::MAX)) as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 >= Self::MAX
    }
}

impl TryFrom<u16> for Progress {
    type Error = DomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> Self {
        value.value()
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;
    use crate::domain::DomainError;

    #[test]
    fn three_lesson_course_advances_in_thirds() {
        let steps: Vec<u8> = (1..=3)
            .map(|done| Progress::from_counts(done, 3).expect("non-empty course").value())
            .collect();

        assert_eq!(steps, vec![33, 66, 100]);
    }

    #[test]
    fn progress_rounds_down() {
        let progress = Progress::from_counts(2, 7).expect("non-empty course");

        assert_eq!(progress.value(), 28);
        assert!(!progress.is_complete());
    }

    #[test]
    fn all_lessons_done_marks_complete() {
        let progress = Progress::from_counts(4, 4).expect("non-empty course");

        assert_eq!(progress.value(), 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn empty_course_is_an_error_not_a_panic() {
        assert_eq!(Progress::from_counts(0, 0), Err(DomainError::EmptyCourse));
        assert_eq!(Progress::from_counts(1, 0), Err(DomainError::EmptyCourse));
    }

    #[test]
    fn overshoot_is_capped() {
        let progress = Progress::from_counts(5, 4).expect("non-empty course");

        assert_eq!(progress.value(), 100);
    }

    #[test]
    fn invalid_progress_is_rejected() {
        let err = Progress::new(101).expect_err("101 should be rejected");

        assert_eq!(
            err.to_string(),
            "invalid progress: 101. progress must be in [0, 100]"
        );
    }
}
