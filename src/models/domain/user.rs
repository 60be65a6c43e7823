use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Teacher,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserRole::User => "user",
            UserRole::Teacher => "teacher",
            UserRole::Admin => "admin",
        };
        f.write_str(name)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "teacher" => Ok(UserRole::Teacher),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
    /// Argon2 PHC string, or a legacy plaintext value awaiting migration on next login.
    pub password: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub enrolled_courses: Vec<String>,
}

impl User {
    pub fn new(username: &str, password_hash: String, role: UserRole) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role,
            password: password_hash,
            created_at: Utc::now(),
            enrolled_courses: Vec::new(),
        }
    }

    pub fn is_enrolled_in(&self, course_id: &str) -> bool {
        self.enrolled_courses.iter().any(|id| id == course_id)
    }
}
