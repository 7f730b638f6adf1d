mod error;
mod ids;
mod material_kind;
mod pagination;
mod policy;
mod progress;
mod role;
mod title;

pub use error::DomainError;
pub use ids::{
    CategoryId, CompletionId, CourseId, EnrollmentId, LessonId, MaterialId, QuestionId, UserId,
};
pub use material_kind::MaterialKind;
pub use pagination::{PageRequest, PageSettings};
pub use policy::{Action, Actor, authorize};
pub use progress::Progress;
pub use role::Role;
pub use title::Title;
