use std::sync::Arc;

use lms_api_types::{CreateQuestionRequest, Paginated, QuestionResponse, UpdateQuestionRequest};
use lms_core::domain::{Action, Actor, CourseId, LessonId, PageRequest, QuestionId, authorize};
use tracing::info;

use super::{ServiceError, ServiceResult, authenticated, format_timestamp, paginated, parse_id};
use crate::repository::{
    CourseRecord, CourseRepository, LessonRepository, NewQuestion, QuestionChanges,
    QuestionRecord, QuestionRepository,
};

const MAX_QUESTION_LEN: usize = 5_000;

/// Course Q&A threads: anyone signed in may ask, the author may rephrase, and
/// the course instructor answers.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
}

impl QuestionService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
    ) -> Self {
        Self {
            questions,
            courses,
            lessons,
        }
    }

    pub async fn list(
        &self,
        course_id: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Paginated<QuestionResponse>> {
        let course_id = course_id
            .map(|raw| parse_id::<CourseId>("course_id", raw))
            .transpose()?;
        let rows = self.questions.list(course_id, page).await?;
        Ok(paginated(rows.map(question_response), page))
    }

    pub async fn get(&self, question_id: &str) -> ServiceResult<QuestionResponse> {
        let question = self.find(question_id).await?;
        Ok(question_response(question))
    }

    pub async fn create(
        &self,
        actor: Option<&Actor>,
        request: CreateQuestionRequest,
    ) -> ServiceResult<QuestionResponse> {
        authorize(actor, Action::AskQuestion)?;
        let actor = authenticated(actor)?;

        let course_id: CourseId = parse_id("course", &request.course)?;
        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(ServiceError::Validation(format!(
                "course '{course_id}' does not exist"
            )));
        }

        let lesson_id = match request.lesson.as_deref() {
            Some(raw) => {
                let lesson_id: LessonId = parse_id("lesson", raw)?;
                let lesson = self.lessons.find_by_id(lesson_id).await?;
                if lesson.is_none_or(|lesson| lesson.course_id != course_id) {
                    return Err(ServiceError::Validation(format!(
                        "lesson '{lesson_id}' does not belong to course '{course_id}'"
                    )));
                }
                Some(lesson_id)
            }
            None => None,
        };

        let question = self
            .questions
            .create(NewQuestion {
                course_id,
                lesson_id,
                author_id: actor.id,
                question: validate_text("question", &request.question)?,
            })
            .await?;

        info!(question_id = %question.id, course_id = %course_id, "question asked");
        Ok(question_response(question))
    }

    /// Applies a question edit and/or an answer. Each part is authorized
    /// separately before anything is written.
    pub async fn update(
        &self,
        actor: Option<&Actor>,
        question_id: &str,
        request: UpdateQuestionRequest,
    ) -> ServiceResult<QuestionResponse> {
        let actor = authenticated(actor)?;
        let question = self.find(question_id).await?;

        let question_text = match request.question.as_deref() {
            Some(text) => {
                authorize(
                    Some(actor),
                    Action::EditQuestion {
                        author: question.author_id,
                    },
                )?;
                Some(validate_text("question", text)?)
            }
            None => None,
        };

        let answer = match request.answer.as_deref() {
            Some(text) => {
                let course = self.course_of(&question).await?;
                authorize(
                    Some(actor),
                    Action::AnswerQuestion {
                        instructor: course.instructor_id,
                    },
                )?;
                Some((validate_text("answer", text)?, actor.id))
            }
            None => None,
        };

        if question_text.is_none() && answer.is_none() {
            return Err(ServiceError::Validation(
                "provide a question or an answer to update".to_string(),
            ));
        }

        let answered = answer.is_some();
        let updated = self
            .questions
            .update(
                question.id,
                QuestionChanges {
                    question: question_text,
                    answer,
                },
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("question"))?;

        if answered {
            info!(question_id = %updated.id, answered_by = %actor.id, "question answered");
        }
        Ok(question_response(updated))
    }

    pub async fn delete(&self, actor: Option<&Actor>, question_id: &str) -> ServiceResult<()> {
        let actor = authenticated(actor)?;
        let question = self.find(question_id).await?;
        let course = self.course_of(&question).await?;

        authorize(
            Some(actor),
            Action::DeleteQuestion {
                author: question.author_id,
                instructor: course.instructor_id,
            },
        )?;

        if !self.questions.delete(question.id).await? {
            return Err(ServiceError::not_found("question"));
        }
        info!(question_id = %question.id, "question deleted");
        Ok(())
    }

    async fn find(&self, question_id: &str) -> ServiceResult<QuestionRecord> {
        let question_id: QuestionId = parse_id("question id", question_id)?;
        self.questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("question"))
    }

    async fn course_of(&self, question: &QuestionRecord) -> ServiceResult<CourseRecord> {
        self.courses
            .find_by_id(question.course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course"))
    }
}

fn validate_text(field: &str, text: &str) -> ServiceResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ServiceError::Validation(format!("{field} must not be empty")));
    }
    if text.chars().count() > MAX_QUESTION_LEN {
        return Err(ServiceError::Validation(format!(
            "{field} is too long (max {MAX_QUESTION_LEN} characters)"
        )));
    }
    Ok(text.to_string())
}

fn question_response(question: QuestionRecord) -> QuestionResponse {
    QuestionResponse {
        id: question.id.to_string(),
        course: question.course_id.to_string(),
        lesson: question.lesson_id.map(|id| id.to_string()),
        author: question.author_id.to_string(),
        question: question.question,
        answer: question.answer,
        answered_by: question.answered_by.map(|id| id.to_string()),
        created_at: format_timestamp(question.created_at),
        updated_at: format_timestamp(question.updated_at),
    }
}
