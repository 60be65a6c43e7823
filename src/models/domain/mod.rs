pub mod course;
pub mod exam;
pub mod exam_result;
pub mod user;
pub use course::{Announcement, Course};
pub use exam::{Exam, Question};
pub use exam_result::ExamResult;
pub use user::{User, UserRole};
