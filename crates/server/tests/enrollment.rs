mod common;

use lms_api_types::{CompleteLessonRequest, EnrollRequest};
use lms_core::domain::{CourseId, LessonId, PageRequest, Role};
use lms_server::entity::{enrollment, lesson_completion};
use lms_server::repository::{CompletionOutcome, EnrollmentRepository, SeaOrmEnrollmentRepository};
use lms_server::service::ServiceError;
use sea_orm::{EntityTrait, PaginatorTrait};

fn enroll_request(course_id: &str) -> EnrollRequest {
    EnrollRequest {
        course_id: course_id.to_string(),
    }
}

fn complete_request(lesson_id: &str) -> CompleteLessonRequest {
    CompleteLessonRequest {
        lesson_id: lesson_id.to_string(),
    }
}

#[tokio::test]
async fn test_enroll_twice_conflicts() {
    let app = common::setup().await;
    let (_, course) = app.course_fixture("grace").await;
    let student = app.register("ada", Role::Student).await;

    let first = app
        .state
        .enrollment
        .enroll(Some(&student), enroll_request(&course.id))
        .await
        .expect("first enrollment should succeed");
    assert_eq!(first.progress, 0);
    assert!(!first.is_completed);
    assert_eq!(first.course_title, "Rust 101");

    let second = app
        .state
        .enrollment
        .enroll(Some(&student), enroll_request(&course.id))
        .await;
    assert!(matches!(second, Err(ServiceError::Conflict(_))));

    let rows = enrollment::Entity::find()
        .count(&app.db)
        .await
        .expect("count should succeed");
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_enroll_unknown_course_is_not_found() {
    let app = common::setup().await;
    let student = app.register("ada", Role::Student).await;

    let result = app
        .state
        .enrollment
        .enroll(Some(&student), enroll_request(&CourseId::new().to_string()))
        .await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_only_students_enroll() {
    let app = common::setup().await;
    let (teacher, course) = app.course_fixture("grace").await;

    let as_teacher = app
        .state
        .enrollment
        .enroll(Some(&teacher), enroll_request(&course.id))
        .await;
    assert!(matches!(as_teacher, Err(ServiceError::Forbidden(_))));

    let anonymous = app
        .state
        .enrollment
        .enroll(None, enroll_request(&course.id))
        .await;
    assert!(matches!(anonymous, Err(ServiceError::Unauthorized(_))));
}

#[tokio::test]
async fn test_progress_walks_through_three_lessons() {
    let app = common::setup().await;
    let (teacher, course) = app.course_fixture("grace").await;
    let lessons = [
        app.lesson(&teacher, &course.id, "Ownership").await,
        app.lesson(&teacher, &course.id, "Borrowing").await,
        app.lesson(&teacher, &course.id, "Lifetimes").await,
    ];
    let student = app.register("ada", Role::Student).await;
    app.state
        .enrollment
        .enroll(Some(&student), enroll_request(&course.id))
        .await
        .expect("enrollment should succeed");

    let mut seen = Vec::new();
    for lesson in &lessons {
        let result = app
            .state
            .enrollment
            .mark_lesson_complete(Some(&student), complete_request(&lesson.id))
            .await
            .expect("completion should succeed");
        assert!(!result.already_completed);
        seen.push((result.progress, result.is_completed));
    }

    assert_eq!(seen, vec![(33, false), (66, false), (100, true)]);

    let progress = app
        .state
        .enrollment
        .get_progress(Some(&student), &course.id)
        .await
        .expect("progress should load");
    assert_eq!(progress.progress_percent, 100);
    assert!(progress.is_completed);

    let mut completed = app
        .state
        .enrollment
        .list_completed_lesson_ids(Some(&student), &course.id)
        .await
        .expect("completed lessons should load");
    let mut expected: Vec<String> = lessons.iter().map(|l| l.id.clone()).collect();
    completed.sort();
    expected.sort();
    assert_eq!(completed, expected);
}

#[tokio::test]
async fn test_completing_twice_is_a_no_op() {
    let app = common::setup().await;
    let (teacher, course) = app.course_fixture("grace").await;
    let first_lesson = app.lesson(&teacher, &course.id, "Ownership").await;
    app.lesson(&teacher, &course.id, "Borrowing").await;
    let student = app.register("ada", Role::Student).await;
    app.state
        .enrollment
        .enroll(Some(&student), enroll_request(&course.id))
        .await
        .expect("enrollment should succeed");

    let first = app
        .state
        .enrollment
        .mark_lesson_complete(Some(&student), complete_request(&first_lesson.id))
        .await
        .expect("first completion should succeed");
    let second = app
        .state
        .enrollment
        .mark_lesson_complete(Some(&student), complete_request(&first_lesson.id))
        .await
        .expect("repeat completion should succeed");

    assert_eq!(first.progress, 50);
    assert!(!first.already_completed);
    assert_eq!(second.progress, 50);
    assert!(second.already_completed);

    let rows = lesson_completion::Entity::find()
        .count(&app.db)
        .await
        .expect("count should succeed");
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_progress_for_non_enrolled_student_is_zero() {
    let app = common::setup().await;
    let (_, course) = app.course_fixture("grace").await;
    let student = app.register("ada", Role::Student).await;

    let progress = app
        .state
        .enrollment
        .get_progress(Some(&student), &course.id)
        .await
        .expect("progress should load");

    assert_eq!(progress.progress_percent, 0);
    assert!(!progress.is_completed);

    let rows = enrollment::Entity::find()
        .count(&app.db)
        .await
        .expect("count should succeed");
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_completion_without_enrollment_is_not_found() {
    let app = common::setup().await;
    let (teacher, course) = app.course_fixture("grace").await;
    let lesson = app.lesson(&teacher, &course.id, "Ownership").await;
    let student = app.register("ada", Role::Student).await;

    let result = app
        .state
        .enrollment
        .mark_lesson_complete(Some(&student), complete_request(&lesson.id))
        .await;

    assert!(matches!(result, Err(ServiceError::NotFound(message)) if message == "enrollment not found"));

    let rows = lesson_completion::Entity::find()
        .count(&app.db)
        .await
        .expect("count should succeed");
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_teacher_cannot_complete_lessons() {
    let app = common::setup().await;
    let (teacher, course) = app.course_fixture("grace").await;
    let lesson = app.lesson(&teacher, &course.id, "Ownership").await;

    let result = app
        .state
        .enrollment
        .mark_lesson_complete(Some(&teacher), complete_request(&lesson.id))
        .await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_unknown_lesson_is_not_found() {
    let app = common::setup().await;
    let student = app.register("ada", Role::Student).await;

    let result = app
        .state
        .enrollment
        .mark_lesson_complete(Some(&student), complete_request(&LessonId::new().to_string()))
        .await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_empty_course_reports_empty_outcome() {
    let app = common::setup().await;
    let (_, course) = app.course_fixture("grace").await;
    let student = app.register("ada", Role::Student).await;
    app.state
        .enrollment
        .enroll(Some(&student), enroll_request(&course.id))
        .await
        .expect("enrollment should succeed");

    let course_id: CourseId = course.id.parse().expect("course id should be a uuid");
    let repo = SeaOrmEnrollmentRepository::new(app.db.clone());
    let outcome = repo
        .record_completion(student.id, LessonId::new(), course_id)
        .await
        .expect("completion should not fail");

    assert!(matches!(outcome, CompletionOutcome::EmptyCourse));

    let current = repo
        .find(student.id, course_id)
        .await
        .expect("lookup should succeed")
        .expect("enrollment should exist");
    assert_eq!(current.progress.value(), 0);
}

#[tokio::test]
async fn test_lessons_of_other_courses_do_not_count() {
    let app = common::setup().await;
    let admin = app.admin("root").await;
    let category = app.category(&admin, "Programming").await;
    let teacher = app.register("grace", Role::Teacher).await;
    let rust = app.course(&teacher, &category.id, "Rust 101").await;
    let go = app.course(&teacher, &category.id, "Go 101").await;
    let rust_lesson = app.lesson(&teacher, &rust.id, "Ownership").await;
    app.lesson(&teacher, &rust.id, "Borrowing").await;
    let go_lesson = app.lesson(&teacher, &go.id, "Goroutines").await;

    let student = app.register("ada", Role::Student).await;
    for course in [&rust, &go] {
        app.state
            .enrollment
            .enroll(Some(&student), enroll_request(&course.id))
            .await
            .expect("enrollment should succeed");
    }

    let go_result = app
        .state
        .enrollment
        .mark_lesson_complete(Some(&student), complete_request(&go_lesson.id))
        .await
        .expect("completion should succeed");
    assert_eq!(go_result.progress, 100);

    let rust_result = app
        .state
        .enrollment
        .mark_lesson_complete(Some(&student), complete_request(&rust_lesson.id))
        .await
        .expect("completion should succeed");
    assert_eq!(rust_result.progress, 50);
    assert!(!rust_result.is_completed);

    let enrollments = app
        .state
        .enrollment
        .list_enrollments(Some(&student), PageRequest::default())
        .await
        .expect("enrollments should list");
    assert_eq!(enrollments.count, 2);
    let mut titles: Vec<&str> = enrollments
        .results
        .iter()
        .map(|e| e.course_title.as_str())
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Go 101", "Rust 101"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_completions_are_serialized() {
    let app = common::setup_file_backed().await;
    let (teacher, course) = app.course_fixture("grace").await;
    let mut lessons = Vec::new();
    for title in ["Ownership", "Borrowing", "Lifetimes", "Traits"] {
        lessons.push(app.lesson(&teacher, &course.id, title).await);
    }
    let student = app.register("ada", Role::Student).await;
    app.state
        .enrollment
        .enroll(Some(&student), enroll_request(&course.id))
        .await
        .expect("enrollment should succeed");

    let tasks: Vec<_> = lessons
        .iter()
        .map(|lesson| {
            let service = app.state.enrollment.clone();
            let request = complete_request(&lesson.id);
            tokio::spawn(async move { service.mark_lesson_complete(Some(&student), request).await })
        })
        .collect();

    for task in tasks {
        let result = task
            .await
            .expect("completion task should not panic")
            .expect("concurrent completion should succeed");
        assert!(!result.already_completed);
    }

    let progress = app
        .state
        .enrollment
        .get_progress(Some(&student), &course.id)
        .await
        .expect("progress should load");
    assert_eq!(progress.progress_percent, 100);
    assert!(progress.is_completed);

    let completions = lesson_completion::Entity::find()
        .count(&app.db)
        .await
        .expect("completions should count");
    assert_eq!(completions, 4);
}
