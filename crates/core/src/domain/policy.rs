//! Who may do what.
//!
//! Every mutating service call asks [`authorize`] first; a denial leaves the
//! store untouched.

use super::{DomainError, Role, UserId};

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, rename or delete a category.
    ManageCategories,
    CreateCourse,
    /// Update or delete a course.
    ManageCourse { instructor: UserId },
    /// Create, update or delete a lesson or material of a course.
    ManageCourseContent { instructor: UserId },
    ListTeacherCourses,
    Enroll,
    ListEnrollments,
    CompleteLesson,
    ListCompletedLessons,
    ViewProgress,
    ViewOwnProfile,
    AskQuestion,
    EditQuestion { author: UserId },
    AnswerQuestion { instructor: UserId },
    DeleteQuestion { author: UserId, instructor: UserId },
}

pub fn authorize(actor: Option<&Actor>, action: Action) -> Result<(), DomainError> {
    let Some(actor) = actor else {
        return Err(DomainError::Unauthenticated);
    };

    let allowed = match action {
        Action::ManageCategories => actor.role == Role::Admin,
        Action::CreateCourse | Action::ListTeacherCourses => actor.role == Role::Teacher,
        Action::ManageCourse { instructor } | Action::ManageCourseContent { instructor } => {
            actor.id == instructor
        }
        Action::Enroll
        | Action::ListEnrollments
        | Action::CompleteLesson
        | Action::ListCompletedLessons => actor.role == Role::Student,
        Action::ViewProgress | Action::ViewOwnProfile | Action::AskQuestion => true,
        Action::EditQuestion { author } => actor.id == author,
        Action::AnswerQuestion { instructor } => actor.id == instructor,
        Action::DeleteQuestion { author, instructor } => {
            actor.id == author || actor.id == instructor
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(DomainError::Forbidden(denial_message(action)))
    }
}

fn denial_message(action: Action) -> &'static str {
    match action {
        Action::ManageCategories => "only admins can manage categories",
        Action::CreateCourse => "only teachers can create courses",
        Action::ListTeacherCourses => "only teachers can list their courses",
        Action::ManageCourse { .. } => "only the course instructor can modify this course",
        Action::ManageCourseContent { .. } => {
            "only the course instructor can modify its lessons and materials"
        }
        Action::Enroll => "only students can enroll in courses",
        Action::ListEnrollments => "only students can list enrollments",
        Action::CompleteLesson => "only students can complete lessons",
        Action::ListCompletedLessons => "only students can list completed lessons",
        Action::EditQuestion { .. } => "only the author can edit this question",
        Action::AnswerQuestion { .. } => "only the course instructor can answer questions",
        Action::DeleteQuestion { .. } => {
            "only the author or the course instructor can delete this question"
        }
        Action::ViewProgress | Action::ViewOwnProfile | Action::AskQuestion => {
            "permission denied"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Actor, authorize};
    use crate::domain::{DomainError, Role, UserId};

    fn actor(role: Role) -> Actor {
        Actor::new(UserId::new(), role)
    }

    #[test]
    fn anonymous_caller_is_unauthenticated() {
        assert_eq!(
            authorize(None, Action::ViewProgress),
            Err(DomainError::Unauthenticated)
        );
    }

    #[test]
    fn only_admin_manages_categories() {
        assert!(authorize(Some(&actor(Role::Admin)), Action::ManageCategories).is_ok());
        assert_eq!(
            authorize(Some(&actor(Role::Teacher)), Action::ManageCategories),
            Err(DomainError::Forbidden("only admins can manage categories"))
        );
    }

    #[test]
    fn only_teachers_create_courses() {
        assert!(authorize(Some(&actor(Role::Teacher)), Action::CreateCourse).is_ok());
        assert!(authorize(Some(&actor(Role::Student)), Action::CreateCourse).is_err());
        assert!(authorize(Some(&actor(Role::Admin)), Action::CreateCourse).is_err());
    }

    #[test]
    fn course_changes_require_ownership() {
        let owner = actor(Role::Teacher);
        let other = actor(Role::Teacher);
        let admin = actor(Role::Admin);
        let action = Action::ManageCourse {
            instructor: owner.id,
        };

        assert!(authorize(Some(&owner), action).is_ok());
        assert!(authorize(Some(&other), action).is_err());
        assert!(authorize(Some(&admin), action).is_err());
    }

    #[test]
    fn student_only_actions() {
        let student = actor(Role::Student);
        let teacher = actor(Role::Teacher);

        for action in [
            Action::Enroll,
            Action::ListEnrollments,
            Action::CompleteLesson,
            Action::ListCompletedLessons,
        ] {
            assert!(authorize(Some(&student), action).is_ok());
            assert!(authorize(Some(&teacher), action).is_err());
        }
    }

    #[test]
    fn question_author_and_instructor_may_delete() {
        let author = actor(Role::Student);
        let instructor = actor(Role::Teacher);
        let stranger = actor(Role::Student);
        let action = Action::DeleteQuestion {
            author: author.id,
            instructor: instructor.id,
        };

        assert!(authorize(Some(&author), action).is_ok());
        assert!(authorize(Some(&instructor), action).is_ok());
        assert!(authorize(Some(&stranger), action).is_err());
    }
}
