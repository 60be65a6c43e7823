use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::domain::{Question, UserRole};

// Missing fields deserialize to empty strings so they are reported through
// validation as InvalidInput instead of as JSON parse failures.

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuestionRequest {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_index: i64,
}

impl From<QuestionRequest> for Question {
    fn from(request: QuestionRequest) -> Self {
        Question {
            question: request.question,
            options: request.options,
            correct_index: request.correct_index,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Minutes.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub duration: Option<i32>,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one question is required"), nested)]
    pub questions: Vec<QuestionRequest>,

    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartExamRequest {
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitExamRequest {
    /// Question index (as a string) to selected option index.
    #[serde(default)]
    pub answers: HashMap<String, serde_json::Value>,
    /// Seconds. Fractional and string values are rounded; anything unreadable counts as 0.
    #[serde(default, deserialize_with = "whole_seconds")]
    pub duration_taken: i64,
}

fn whole_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    let seconds = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(round_seconds)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().and_then(round_seconds),
        _ => None,
    };

    Ok(seconds.unwrap_or(0).max(0))
}

fn round_seconds(seconds: f64) -> Option<i64> {
    seconds.is_finite().then(|| seconds.round() as i64)
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnnouncementRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "Announcement content is required"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub materials: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminCreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}
