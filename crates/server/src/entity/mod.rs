pub mod category;
pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod lesson_completion;
pub mod material;
pub mod question_answer;
pub mod user;
