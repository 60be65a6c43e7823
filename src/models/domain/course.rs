use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A notice posted to a course by its instructor or an admin.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Announcement {
    pub content: String,
    pub sender: String,
    pub date: DateTime<Utc>,
}

impl Announcement {
    pub fn new(content: &str, sender: &str) -> Self {
        Announcement {
            content: content.to_string(),
            sender: sender.to_string(),
            date: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub level: String,
    /// Seeded catalogue courses have no instructor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    /// Visible only to enrolled users, the instructor and admins.
    #[serde(default)]
    pub materials: Vec<String>,
    /// Oldest first. Same visibility as `materials`.
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn new(title: &str, instructor_id: Option<&str>) -> Self {
        Course {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: String::new(),
            price: 0.0,
            schedule: String::new(),
            level: String::new(),
            instructor_id: instructor_id.map(str::to_string),
            materials: Vec::new(),
            announcements: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }
}
