use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default exam duration in minutes.
pub const DEFAULT_DURATION_MINUTES: i32 = 30;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Position of the correct option. Not checked against `options` on write;
    /// an out-of-range value simply never matches when grading.
    pub correct_index: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Exam {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: i32,
    pub questions: Vec<Question>,
    /// Room-code style access gate, stored and compared in plaintext.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_by_user_id: String,
    pub creator_name: String,
    pub created_at: DateTime<Utc>,
}

impl Exam {
    pub fn new(
        title: &str,
        description: &str,
        duration: i32,
        questions: Vec<Question>,
        password: Option<String>,
        created_by_user_id: &str,
        creator_name: &str,
    ) -> Self {
        Exam {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            duration,
            questions,
            password,
            created_by_user_id: created_by_user_id.to_string(),
            creator_name: creator_name.to_string(),
            created_at: Utc::now(),
        }
    }

    /// An absent or empty password means the exam is not gated.
    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Case-sensitive exact comparison against the stored password.
    pub fn admits(&self, supplied: Option<&str>) -> bool {
        match self.password.as_deref() {
            None | Some("") => true,
            Some(expected) => supplied == Some(expected),
        }
    }

    pub fn question_count(&self) -> i32 {
        self.questions.len() as i32
    }
}
