use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use lms_api_types::{
    CategoryRequest, CategoryResponse, CourseResponse, CreateCourseRequest, InstructorSummary,
    Paginated, UpdateCourseRequest,
};
use lms_core::domain::{Action, Actor, CategoryId, CourseId, PageRequest, Title, UserId, authorize};
use tracing::info;

use super::{ServiceError, ServiceResult, authenticated, format_timestamp, paginated, parse_id};
use crate::repository::{
    CategoryRecord, CategoryRepository, CourseChanges, CourseFilter, CourseRecord,
    CourseRepository, LessonRepository, NewCourse, UserRepository, is_unique_violation,
};

/// Categories and courses.
#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
    users: Arc<dyn UserRepository>,
}

impl CatalogService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            categories,
            courses,
            lessons,
            users,
        }
    }

    pub async fn list_categories(
        &self,
        page: PageRequest,
    ) -> ServiceResult<Paginated<CategoryResponse>> {
        let rows = self.categories.list(page).await?;
        Ok(paginated(rows.map(category_response), page))
    }

    pub async fn get_category(&self, category_id: &str) -> ServiceResult<CategoryResponse> {
        let category_id: CategoryId = parse_id("category id", category_id)?;
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("category"))?;

        Ok(category_response(category))
    }

    pub async fn create_category(
        &self,
        actor: Option<&Actor>,
        request: CategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        authorize(actor, Action::ManageCategories)?;
        let title = Title::new(request.title)?;

        if self.categories.find_by_title(&title).await?.is_some() {
            return Err(duplicate_category(&title));
        }

        let category = self
            .categories
            .create(title.clone())
            .await?
            .ok_or_else(|| duplicate_category(&title))?;
        info!(category_id = %category.id, "category created");
        Ok(category_response(category))
    }

    pub async fn update_category(
        &self,
        actor: Option<&Actor>,
        category_id: &str,
        request: CategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        authorize(actor, Action::ManageCategories)?;
        let category_id: CategoryId = parse_id("category id", category_id)?;
        let title = Title::new(request.title)?;

        let duplicate = self.categories.find_by_title(&title).await?;
        if duplicate.is_some_and(|existing| existing.id != category_id) {
            return Err(duplicate_category(&title));
        }

        let category = match self.categories.rename(category_id, title.clone()).await {
            Ok(category) => category.ok_or_else(|| ServiceError::not_found("category"))?,
            Err(err) if is_unique_violation(&err) => return Err(duplicate_category(&title)),
            Err(err) => return Err(err.into()),
        };

        Ok(category_response(category))
    }

    pub async fn delete_category(
        &self,
        actor: Option<&Actor>,
        category_id: &str,
    ) -> ServiceResult<()> {
        authorize(actor, Action::ManageCategories)?;
        let category_id: CategoryId = parse_id("category id", category_id)?;

        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(ServiceError::not_found("category"));
        }
        if self.courses.count_by_category(category_id).await? > 0 {
            return Err(ServiceError::Conflict(
                "category still has courses and cannot be deleted".to_string(),
            ));
        }

        if !self.categories.delete(category_id).await? {
            return Err(ServiceError::not_found("category"));
        }
        info!(category_id = %category_id, "category deleted");
        Ok(())
    }

    pub async fn list_courses(
        &self,
        category_id: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Paginated<CourseResponse>> {
        let filter = CourseFilter {
            category_id: category_id
                .map(|raw| parse_id("category_id", raw))
                .transpose()?,
            instructor_id: None,
        };

        self.list_with_filter(filter, page).await
    }

    /// Courses taught by the calling teacher.
    pub async fn teacher_courses(
        &self,
        actor: Option<&Actor>,
        page: PageRequest,
    ) -> ServiceResult<Paginated<CourseResponse>> {
        let actor = authenticated(actor)?;
        authorize(Some(actor), Action::ListTeacherCourses)?;

        let filter = CourseFilter {
            category_id: None,
            instructor_id: Some(actor.id),
        };

        self.list_with_filter(filter, page).await
    }

    pub async fn get_course(&self, course_id: &str) -> ServiceResult<CourseResponse> {
        let course_id: CourseId = parse_id("course id", course_id)?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course"))?;

        self.shape_one(course).await
    }

    /// The instructor is always the caller; any instructor in the payload is
    /// ignored.
    pub async fn create_course(
        &self,
        actor: Option<&Actor>,
        request: CreateCourseRequest,
    ) -> ServiceResult<CourseResponse> {
        let actor = authenticated(actor)?;
        authorize(Some(actor), Action::CreateCourse)?;

        let category_id = self.existing_category(&request.category).await?;
        let title = Title::new(request.title)?;
        validate_price(request.price_cents)?;

        let course = self
            .courses
            .create(NewCourse {
                category_id,
                instructor_id: actor.id,
                title,
                description: request.description,
                price_cents: request.price_cents,
                duration: request.duration,
                banner: request.banner,
                is_active: request.is_active.unwrap_or(true),
            })
            .await?;

        info!(course_id = %course.id, instructor_id = %actor.id, "course created");
        self.shape_one(course).await
    }

    pub async fn update_course(
        &self,
        actor: Option<&Actor>,
        course_id: &str,
        request: UpdateCourseRequest,
    ) -> ServiceResult<CourseResponse> {
        let actor = authenticated(actor)?;
        let course = self.owned_course(actor, course_id).await?;

        let category_id = match request.category.as_deref() {
            Some(raw) => Some(self.existing_category(raw).await?),
            None => None,
        };
        if let Some(price) = request.price_cents {
            validate_price(price)?;
        }

        let changes = CourseChanges {
            category_id,
            title: request.title.map(Title::new).transpose()?,
            description: request.description,
            price_cents: request.price_cents,
            duration: request.duration,
            banner: request.banner,
            is_active: request.is_active,
        };

        let updated = self
            .courses
            .update(course.id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("course"))?;

        self.shape_one(updated).await
    }

    pub async fn delete_course(&self, actor: Option<&Actor>, course_id: &str) -> ServiceResult<()> {
        let actor = authenticated(actor)?;
        let course = self.owned_course(actor, course_id).await?;

        if !self.courses.delete(course.id).await? {
            return Err(ServiceError::not_found("course"));
        }
        info!(course_id = %course.id, "course deleted");
        Ok(())
    }

    async fn owned_course(&self, actor: &Actor, course_id: &str) -> ServiceResult<CourseRecord> {
        let course_id: CourseId = parse_id("course id", course_id)?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course"))?;

        authorize(
            Some(actor),
            Action::ManageCourse {
                instructor: course.instructor_id,
            },
        )?;
        Ok(course)
    }

    async fn existing_category(&self, raw: &str) -> ServiceResult<CategoryId> {
        let category_id: CategoryId = parse_id("category", raw)?;
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(ServiceError::Validation(format!(
                "category '{category_id}' does not exist"
            )));
        }
        Ok(category_id)
    }

    async fn list_with_filter(
        &self,
        filter: CourseFilter,
        page: PageRequest,
    ) -> ServiceResult<Paginated<CourseResponse>> {
        let rows = self.courses.list(filter, page).await?;
        let results = self.shape_courses(rows.items).await?;

        Ok(Paginated {
            count: rows.total,
            page: page.page(),
            limit: page.limit(),
            results,
        })
    }

    async fn shape_one(&self, course: CourseRecord) -> ServiceResult<CourseResponse> {
        let mut shaped = self.shape_courses(vec![course]).await?;
        shaped
            .pop()
            .ok_or_else(|| anyhow!("course shaping returned no rows").into())
    }

    /// Builds course responses with their category, instructor and lesson
    /// count, loading each related table once for the whole batch.
    async fn shape_courses(&self, courses: Vec<CourseRecord>) -> ServiceResult<Vec<CourseResponse>> {
        let course_ids: Vec<CourseId> = courses.iter().map(|c| c.id).collect();
        let mut category_ids: Vec<CategoryId> = courses.iter().map(|c| c.category_id).collect();
        let mut instructor_ids: Vec<UserId> = courses.iter().map(|c| c.instructor_id).collect();
        category_ids.sort();
        category_ids.dedup();
        instructor_ids.sort();
        instructor_ids.dedup();

        let categories: HashMap<CategoryId, CategoryRecord> = self
            .categories
            .find_many(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let instructors: HashMap<UserId, InstructorSummary> = self
            .users
            .find_many(&instructor_ids)
            .await?
            .into_iter()
            .map(|u| {
                let summary = InstructorSummary {
                    id: u.id.to_string(),
                    username: u.username.clone(),
                    full_name: u.full_name(),
                };
                (u.id, summary)
            })
            .collect();
        let lesson_counts = self.lessons.count_by_courses(&course_ids).await?;

        courses
            .into_iter()
            .map(|course| -> ServiceResult<CourseResponse> {
                let category = categories.get(&course.category_id).ok_or_else(|| {
                    anyhow!(
                        "course {} references missing category {}",
                        course.id,
                        course.category_id
                    )
                })?;
                let instructor = instructors.get(&course.instructor_id).ok_or_else(|| {
                    anyhow!(
                        "course {} references missing instructor {}",
                        course.id,
                        course.instructor_id
                    )
                })?;

                Ok(CourseResponse {
                    id: course.id.to_string(),
                    title: course.title,
                    description: course.description,
                    price_cents: course.price_cents,
                    duration: course.duration,
                    banner: course.banner,
                    is_active: course.is_active,
                    category: category_response(category.clone()),
                    instructor: instructor.clone(),
                    lessons: lesson_counts.get(&course.id).copied().unwrap_or(0),
                    created_at: format_timestamp(course.created_at),
                    updated_at: format_timestamp(course.updated_at),
                })
            })
            .collect()
    }
}

fn validate_price(price_cents: i64) -> ServiceResult<()> {
    if price_cents < 0 {
        return Err(ServiceError::Validation(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn duplicate_category(title: &Title) -> ServiceError {
    ServiceError::Conflict(format!("category '{}' already exists", title.as_str()))
}

fn category_response(category: CategoryRecord) -> CategoryResponse {
    CategoryResponse {
        id: category.id.to_string(),
        title: category.title,
    }
}
