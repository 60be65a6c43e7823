pub mod course_repository;
pub mod exam_repository;
pub mod result_repository;
pub mod user_repository;

pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use exam_repository::{ExamRepository, MongoExamRepository};
pub use result_repository::{MongoResultRepository, ResultRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
