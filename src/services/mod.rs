pub mod admin_service;
pub mod auth_service;
pub mod course_service;
pub mod exam_attempt_service;
pub mod exam_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use course_service::CourseService;
pub use exam_service::ExamService;
