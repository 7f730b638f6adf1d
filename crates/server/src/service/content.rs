use std::sync::Arc;

use lms_api_types::{
    CreateLessonRequest, CreateMaterialRequest, LessonResponse, MaterialResponse, Paginated,
    UpdateLessonRequest, UpdateMaterialRequest,
};
use lms_core::domain::{
    Action, Actor, CourseId, LessonId, MaterialId, MaterialKind, PageRequest, Title, authorize,
};
use tracing::info;

use super::{ServiceError, ServiceResult, authenticated, format_timestamp, paginated, parse_id};
use crate::repository::{
    CourseRecord, CourseRepository, LessonChanges, LessonRecord, LessonRepository,
    MaterialChanges, MaterialRecord, MaterialRepository, NewLesson, NewMaterial,
};

/// Lessons and supplementary materials of a course. Writes are limited to the
/// course instructor.
#[derive(Clone)]
pub struct ContentService {
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
    materials: Arc<dyn MaterialRepository>,
}

impl ContentService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
        materials: Arc<dyn MaterialRepository>,
    ) -> Self {
        Self {
            courses,
            lessons,
            materials,
        }
    }

    pub async fn list_lessons(
        &self,
        course_id: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Paginated<LessonResponse>> {
        let course_id = course_id
            .map(|raw| parse_id::<CourseId>("course_id", raw))
            .transpose()?;
        let rows = self.lessons.list(course_id, page).await?;
        Ok(paginated(rows.map(lesson_response), page))
    }

    /// All lessons of one course in creation order.
    pub async fn course_lessons(&self, course_id: &str) -> ServiceResult<Vec<LessonResponse>> {
        let course_id: CourseId = parse_id("course id", course_id)?;
        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(ServiceError::not_found("course"));
        }

        let lessons = self.lessons.list_by_course(course_id).await?;
        Ok(lessons.into_iter().map(lesson_response).collect())
    }

    pub async fn get_lesson(&self, lesson_id: &str) -> ServiceResult<LessonResponse> {
        let lesson = self.find_lesson(lesson_id).await?;
        Ok(lesson_response(lesson))
    }

    pub async fn create_lesson(
        &self,
        actor: Option<&Actor>,
        request: CreateLessonRequest,
    ) -> ServiceResult<LessonResponse> {
        let actor = authenticated(actor)?;
        let course = self.referenced_course(&request.course).await?;
        authorize_content(actor, &course)?;

        let lesson = self
            .lessons
            .create(NewLesson {
                course_id: course.id,
                title: Title::new(request.title)?,
                description: request.description,
                video: request.video,
            })
            .await?;

        info!(lesson_id = %lesson.id, course_id = %course.id, "lesson created");
        Ok(lesson_response(lesson))
    }

    pub async fn update_lesson(
        &self,
        actor: Option<&Actor>,
        lesson_id: &str,
        request: UpdateLessonRequest,
    ) -> ServiceResult<LessonResponse> {
        let actor = authenticated(actor)?;
        let lesson = self.find_lesson(lesson_id).await?;
        self.authorize_for_course(actor, lesson.course_id).await?;

        let changes = LessonChanges {
            title: request.title.map(Title::new).transpose()?,
            description: request.description,
            video: request.video,
        };

        let updated = self
            .lessons
            .update(lesson.id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("lesson"))?;

        Ok(lesson_response(updated))
    }

    /// Deleting a lesson leaves existing enrollment progress untouched.
    pub async fn delete_lesson(&self, actor: Option<&Actor>, lesson_id: &str) -> ServiceResult<()> {
        let actor = authenticated(actor)?;
        let lesson = self.find_lesson(lesson_id).await?;
        self.authorize_for_course(actor, lesson.course_id).await?;

        if !self.lessons.delete(lesson.id).await? {
            return Err(ServiceError::not_found("lesson"));
        }
        info!(lesson_id = %lesson.id, "lesson deleted");
        Ok(())
    }

    pub async fn list_materials(
        &self,
        course_id: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Paginated<MaterialResponse>> {
        let course_id = course_id
            .map(|raw| parse_id::<CourseId>("course_id", raw))
            .transpose()?;
        let rows = self.materials.list(course_id, page).await?;
        Ok(paginated(rows.map(material_response), page))
    }

    pub async fn get_material(&self, material_id: &str) -> ServiceResult<MaterialResponse> {
        let material = self.find_material(material_id).await?;
        Ok(material_response(material))
    }

    pub async fn create_material(
        &self,
        actor: Option<&Actor>,
        request: CreateMaterialRequest,
    ) -> ServiceResult<MaterialResponse> {
        let actor = authenticated(actor)?;
        let course = self.referenced_course(&request.course).await?;
        authorize_content(actor, &course)?;

        let material = self
            .materials
            .create(NewMaterial {
                course_id: course.id,
                title: Title::new(request.title)?,
                description: request.description,
                kind: request.file_type.parse::<MaterialKind>()?,
                file: request.file,
            })
            .await?;

        info!(material_id = %material.id, course_id = %course.id, "material created");
        Ok(material_response(material))
    }

    pub async fn update_material(
        &self,
        actor: Option<&Actor>,
        material_id: &str,
        request: UpdateMaterialRequest,
    ) -> ServiceResult<MaterialResponse> {
        let actor = authenticated(actor)?;
        let material = self.find_material(material_id).await?;
        self.authorize_for_course(actor, material.course_id).await?;

        let changes = MaterialChanges {
            title: request.title.map(Title::new).transpose()?,
            description: request.description,
            kind: request
                .file_type
                .as_deref()
                .map(str::parse::<MaterialKind>)
                .transpose()?,
            file: request.file,
        };

        let updated = self
            .materials
            .update(material.id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("material"))?;

        Ok(material_response(updated))
    }

    pub async fn delete_material(
        &self,
        actor: Option<&Actor>,
        material_id: &str,
    ) -> ServiceResult<()> {
        let actor = authenticated(actor)?;
        let material = self.find_material(material_id).await?;
        self.authorize_for_course(actor, material.course_id).await?;

        if !self.materials.delete(material.id).await? {
            return Err(ServiceError::not_found("material"));
        }
        info!(material_id = %material.id, "material deleted");
        Ok(())
    }

    async fn find_lesson(&self, lesson_id: &str) -> ServiceResult<LessonRecord> {
        let lesson_id: LessonId = parse_id("lesson id", lesson_id)?;
        self.lessons
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("lesson"))
    }

    async fn find_material(&self, material_id: &str) -> ServiceResult<MaterialRecord> {
        let material_id: MaterialId = parse_id("material id", material_id)?;
        self.materials
            .find_by_id(material_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("material"))
    }

    /// Resolves a course named in a request body.
    async fn referenced_course(&self, raw: &str) -> ServiceResult<CourseRecord> {
        let course_id: CourseId = parse_id("course", raw)?;
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ServiceError::Validation(format!("course '{course_id}' does not exist")))
    }

    async fn authorize_for_course(&self, actor: &Actor, course_id: CourseId) -> ServiceResult<()> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course"))?;
        authorize_content(actor, &course)
    }
}

fn authorize_content(actor: &Actor, course: &CourseRecord) -> ServiceResult<()> {
    authorize(
        Some(actor),
        Action::ManageCourseContent {
            instructor: course.instructor_id,
        },
    )?;
    Ok(())
}

pub(crate) fn lesson_response(lesson: LessonRecord) -> LessonResponse {
    LessonResponse {
        id: lesson.id.to_string(),
        course: lesson.course_id.to_string(),
        title: lesson.title,
        description: lesson.description,
        video: lesson.video,
        created_at: format_timestamp(lesson.created_at),
    }
}

fn material_response(material: MaterialRecord) -> MaterialResponse {
    MaterialResponse {
        id: material.id.to_string(),
        course: material.course_id.to_string(),
        title: material.title,
        description: material.description,
        file_type: material.kind.to_string(),
        file: material.file,
        created_at: format_timestamp(material.created_at),
    }
}
