use std::collections::HashMap;
use std::sync::Arc;

use lms_api_types::{
    CompleteLessonRequest, CompleteLessonResponse, EnrollRequest, EnrollmentResponse, Paginated,
    ProgressResponse,
};
use lms_core::domain::{Action, Actor, CourseId, LessonId, PageRequest, authorize};
use tracing::{debug, info, warn};

use super::{ServiceError, ServiceResult, authenticated, parse_id};
use crate::repository::{
    CompletionOutcome, CourseRepository, EnrollmentRecord, EnrollmentRepository,
    LessonRepository,
};

/// Enrollment and lesson-completion tracking.
#[derive(Clone)]
pub struct EnrollmentService {
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl EnrollmentService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            courses,
            lessons,
            enrollments,
        }
    }

    pub async fn enroll(
        &self,
        actor: Option<&Actor>,
        request: EnrollRequest,
    ) -> ServiceResult<EnrollmentResponse> {
        let actor = authenticated(actor)?;
        authorize(Some(actor), Action::Enroll)?;

        let course_id: CourseId = parse_id("course_id", &request.course_id)?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course"))?;

        let Some(enrollment) = self.enrollments.create(actor.id, course.id).await? else {
            debug!(user_id = %actor.id, course_id = %course.id, "duplicate enrollment rejected");
            return Err(ServiceError::Conflict(
                "already enrolled in this course".to_string(),
            ));
        };

        info!(
            user_id = %actor.id,
            course_id = %course.id,
            enrollment_id = %enrollment.id,
            "student enrolled"
        );
        Ok(enrollment_response(enrollment, course.title))
    }

    /// Records a completed lesson and returns the recomputed progress. A
    /// repeat completion is a successful no-op.
    pub async fn mark_lesson_complete(
        &self,
        actor: Option<&Actor>,
        request: CompleteLessonRequest,
    ) -> ServiceResult<CompleteLessonResponse> {
        let actor = authenticated(actor)?;
        authorize(Some(actor), Action::CompleteLesson)?;

        let lesson_id: LessonId = parse_id("lesson_id", &request.lesson_id)?;
        let lesson = self
            .lessons
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("lesson"))?;

        let outcome = self
            .enrollments
            .record_completion(actor.id, lesson.id, lesson.course_id)
            .await?;

        match outcome {
            CompletionOutcome::Recorded(enrollment) => {
                info!(
                    user_id = %actor.id,
                    lesson_id = %lesson.id,
                    course_id = %lesson.course_id,
                    progress = enrollment.progress.value(),
                    completed = enrollment.is_completed,
                    "lesson completed"
                );
                Ok(CompleteLessonResponse {
                    progress: enrollment.progress.value(),
                    is_completed: enrollment.is_completed,
                    already_completed: false,
                })
            }
            CompletionOutcome::AlreadyCompleted(enrollment) => {
                debug!(user_id = %actor.id, lesson_id = %lesson.id, "lesson already completed");
                let (progress, is_completed) = enrollment
                    .map(|e| (e.progress.value(), e.is_completed))
                    .unwrap_or((0, false));
                Ok(CompleteLessonResponse {
                    progress,
                    is_completed,
                    already_completed: true,
                })
            }
            CompletionOutcome::NotEnrolled => {
                Err(ServiceError::NotFound("enrollment not found".to_string()))
            }
            CompletionOutcome::EmptyCourse => {
                warn!(course_id = %lesson.course_id, "completion against a course with no lessons");
                Err(ServiceError::InvalidState(
                    "course has no lessons, progress cannot be computed".to_string(),
                ))
            }
        }
    }

    /// Progress of the caller in a course; zero when not enrolled. Never
    /// creates an enrollment.
    pub async fn get_progress(
        &self,
        actor: Option<&Actor>,
        course_id: &str,
    ) -> ServiceResult<ProgressResponse> {
        let actor = authenticated(actor)?;
        authorize(Some(actor), Action::ViewProgress)?;
        let course_id: CourseId = parse_id("course_id", course_id)?;

        let response = match self.enrollments.find(actor.id, course_id).await? {
            Some(enrollment) => ProgressResponse {
                progress_percent: enrollment.progress.value(),
                is_completed: enrollment.is_completed,
            },
            None => ProgressResponse {
                progress_percent: 0,
                is_completed: false,
            },
        };

        Ok(response)
    }

    pub async fn list_completed_lesson_ids(
        &self,
        actor: Option<&Actor>,
        course_id: &str,
    ) -> ServiceResult<Vec<String>> {
        let actor = authenticated(actor)?;
        authorize(Some(actor), Action::ListCompletedLessons)?;
        let course_id: CourseId = parse_id("course_id", course_id)?;

        let ids = self
            .enrollments
            .completed_lesson_ids(actor.id, course_id)
            .await?;
        Ok(ids.into_iter().map(|id| id.to_string()).collect())
    }

    pub async fn list_enrollments(
        &self,
        actor: Option<&Actor>,
        page: PageRequest,
    ) -> ServiceResult<Paginated<EnrollmentResponse>> {
        let actor = authenticated(actor)?;
        authorize(Some(actor), Action::ListEnrollments)?;

        let rows = self.enrollments.list_active_by_user(actor.id, page).await?;
        let course_ids: Vec<CourseId> = rows.items.iter().map(|e| e.course_id).collect();
        let titles: HashMap<CourseId, String> = self
            .courses
            .find_many(&course_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c.title))
            .collect();

        let results = rows
            .items
            .into_iter()
            .map(|enrollment| {
                let title = titles
                    .get(&enrollment.course_id)
                    .cloned()
                    .unwrap_or_default();
                enrollment_response(enrollment, title)
            })
            .collect();

        Ok(Paginated {
            count: rows.total,
            page: page.page(),
            limit: page.limit(),
            results,
        })
    }
}

fn enrollment_response(enrollment: EnrollmentRecord, course_title: String) -> EnrollmentResponse {
    EnrollmentResponse {
        id: enrollment.id.to_string(),
        course: enrollment.course_id.to_string(),
        course_title,
        progress: enrollment.progress.value(),
        is_completed: enrollment.is_completed,
    }
}
