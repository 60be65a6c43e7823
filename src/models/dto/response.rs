use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Announcement, Course, User, UserRole};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

/// Public course listing entry. Never carries course materials.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub schedule: String,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
}

impl From<Course> for CourseSummary {
    fn from(course: Course) -> Self {
        CourseSummary {
            id: course.id,
            title: course.title,
            description: course.description,
            price: course.price,
            schedule: course.schedule,
            level: course.level,
            instructor_id: course.instructor_id,
        }
    }
}

/// Privileged course content: materials and announcements.
#[derive(Debug, Serialize)]
pub struct CourseMaterials {
    pub course_id: String,
    pub title: String,
    pub materials: Vec<String>,
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub enrolled_courses_details: Vec<CourseSummary>,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: UserProfile,
}

/// Admin view of a user. The stored credential is never exposed.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub enrolled_courses: Vec<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            enrolled_courses: user.enrolled_courses,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub users: u64,
    pub courses: u64,
    pub exams: u64,
    pub results: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dto_omits_password() {
        let user = User::new("carol", "$argon2id$secret".to_string(), UserRole::Teacher);
        let dto: UserDto = user.into();

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "teacher");
    }

    #[test]
    fn test_course_summary_omits_materials() {
        let mut course = Course::new("IELTS 7.0", Some("teacher-1"));
        course.materials.push("https://files.example.com/week1.pdf".to_string());
        course
            .announcements
            .push(Announcement::new("Mock test on Monday", "teach"));

        let json = serde_json::to_value(CourseSummary::from(course)).unwrap();
        assert!(json.get("materials").is_none());
        assert!(json.get("announcements").is_none());
        assert_eq!(json["title"], "IELTS 7.0");
    }
}
