use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, 36).primary_key())
                    .col(string_len(User::Username, 150).unique_key())
                    .col(string_len(User::Email, 255).unique_key())
                    .col(string_len(User::PasswordHash, 255))
                    // Role enum is represented in app code. DB stores compact numeric code.
                    // 0=admin, 1=teacher, 2=student
                    .col(
                        small_integer(User::Role)
                            .check(Expr::col(User::Role).gte(0))
                            .check(Expr::col(User::Role).lte(2)),
                    )
                    .col(string_len(User::FirstName, 150).default(""))
                    .col(string_len(User::LastName, 150).default(""))
                    .col(string_len_null(User::MobileNo, 20))
                    .col(timestamp(User::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(string_len(Category::Id, 36).primary_key())
                    .col(string_len(Category::Title, 200).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(string_len(Course::Id, 36).primary_key())
                    .col(string_len(Course::CategoryId, 36))
                    .col(string_len(Course::InstructorId, 36))
                    .col(string_len(Course::Title, 200))
                    .col(text(Course::Description))
                    .col(big_integer(Course::PriceCents).check(Expr::col(Course::PriceCents).gte(0)))
                    .col(string_len(Course::Duration, 100))
                    .col(string_len_null(Course::Banner, 500))
                    .col(boolean(Course::IsActive).default(true))
                    .col(timestamp(Course::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Course::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course-category_id")
                            .from(Course::Table, Course::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course-instructor_id")
                            .from(Course::Table, Course::InstructorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Lesson::Table)
                    .if_not_exists()
                    .col(string_len(Lesson::Id, 36).primary_key())
                    .col(string_len(Lesson::CourseId, 36))
                    .col(string_len(Lesson::Title, 200))
                    .col(text(Lesson::Description))
                    .col(string_len(Lesson::Video, 500))
                    .col(timestamp(Lesson::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lesson-course_id")
                            .from(Lesson::Table, Lesson::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Material::Table)
                    .if_not_exists()
                    .col(string_len(Material::Id, 36).primary_key())
                    .col(string_len(Material::CourseId, 36))
                    .col(string_len(Material::Title, 200))
                    .col(text(Material::Description))
                    // MaterialKind enum is represented in app code.
                    // 0=pdf, 1=video, 2=document, 3=link, 4=other
                    .col(
                        small_integer(Material::FileType)
                            .check(Expr::col(Material::FileType).gte(0))
                            .check(Expr::col(Material::FileType).lte(4)),
                    )
                    .col(string_len_null(Material::File, 500))
                    .col(timestamp(Material::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-material-course_id")
                            .from(Material::Table, Material::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Enrollment::Table)
                    .if_not_exists()
                    .col(string_len(Enrollment::Id, 36).primary_key())
                    .col(string_len(Enrollment::UserId, 36))
                    .col(string_len(Enrollment::CourseId, 36))
                    .col(
                        small_integer(Enrollment::Progress)
                            .default(0)
                            .check(Expr::col(Enrollment::Progress).gte(0))
                            .check(Expr::col(Enrollment::Progress).lte(100)),
                    )
                    .col(boolean(Enrollment::IsCompleted).default(false))
                    .col(boolean(Enrollment::IsActive).default(true))
                    .col(timestamp(Enrollment::EnrolledAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollment-user_id")
                            .from(Enrollment::Table, Enrollment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollment-course_id")
                            .from(Enrollment::Table, Enrollment::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LessonCompletion::Table)
                    .if_not_exists()
                    .col(string_len(LessonCompletion::Id, 36).primary_key())
                    .col(string_len(LessonCompletion::StudentId, 36))
                    .col(string_len(LessonCompletion::LessonId, 36))
                    .col(
                        timestamp(LessonCompletion::CompletedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lesson_completion-student_id")
                            .from(LessonCompletion::Table, LessonCompletion::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lesson_completion-lesson_id")
                            .from(LessonCompletion::Table, LessonCompletion::LessonId)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuestionAnswer::Table)
                    .if_not_exists()
                    .col(string_len(QuestionAnswer::Id, 36).primary_key())
                    .col(string_len(QuestionAnswer::CourseId, 36))
                    .col(string_len_null(QuestionAnswer::LessonId, 36))
                    .col(string_len(QuestionAnswer::AuthorId, 36))
                    .col(text(QuestionAnswer::Question))
                    .col(text_null(QuestionAnswer::Answer))
                    .col(string_len_null(QuestionAnswer::AnsweredBy, 36))
                    .col(timestamp(QuestionAnswer::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(QuestionAnswer::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-question_answer-course_id")
                            .from(QuestionAnswer::Table, QuestionAnswer::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-question_answer-lesson_id")
                            .from(QuestionAnswer::Table, QuestionAnswer::LessonId)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-question_answer-author_id")
                            .from(QuestionAnswer::Table, QuestionAnswer::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One enrollment per (student, course). Enrolling relies on this index
        // for insert-or-ignore.
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollment_user_course")
                    .table(Enrollment::Table)
                    .col(Enrollment::UserId)
                    .col(Enrollment::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One completion per (student, lesson).
        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_completion_student_lesson")
                    .table(LessonCompletion::Table)
                    .col(LessonCompletion::StudentId)
                    .col(LessonCompletion::LessonId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_instructor_id")
                    .table(Course::Table)
                    .col(Course::InstructorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_category_id")
                    .table(Course::Table)
                    .col(Course::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_course_id")
                    .table(Lesson::Table)
                    .col(Lesson::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_material_course_id")
                    .table(Material::Table)
                    .col(Material::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_question_answer_course_id")
                    .table(QuestionAnswer::Table)
                    .col(QuestionAnswer::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuestionAnswer::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(LessonCompletion::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Material::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lesson::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    FirstName,
    LastName,
    MobileNo,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
    Title,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    Id,
    CategoryId,
    InstructorId,
    Title,
    Description,
    PriceCents,
    Duration,
    Banner,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lesson {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    Video,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Material {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    FileType,
    File,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Enrollment {
    Table,
    Id,
    UserId,
    CourseId,
    Progress,
    IsCompleted,
    IsActive,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum LessonCompletion {
    Table,
    Id,
    StudentId,
    LessonId,
    CompletedAt,
}

#[derive(DeriveIden)]
enum QuestionAnswer {
    Table,
    Id,
    CourseId,
    LessonId,
    AuthorId,
    Question,
    Answer,
    AnsweredBy,
    CreatedAt,
    UpdatedAt,
}
