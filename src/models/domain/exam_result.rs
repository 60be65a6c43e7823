use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::Exam;

/// One graded attempt. Written once per submission and never modified.
///
/// `exam_title` and `exam_creator_id` are copied from the exam at write time so the
/// ledger can be queried by author without touching the exams collection. If an
/// exam's creator ever changed, older results would keep the previous creator id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExamResult {
    pub id: String,
    pub user_id: String,
    pub exam_id: String,
    pub exam_title: String,
    pub exam_creator_id: String,
    pub score: i32,
    pub total_questions: i32,
    pub duration_taken: i64,
    pub attempt_number: i32,
    /// Stored as a BSON date so the ledger sorts chronologically.
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl ExamResult {
    pub fn new(
        user_id: &str,
        exam: &Exam,
        score: i32,
        duration_taken: i64,
        attempt_number: i32,
    ) -> Self {
        ExamResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            exam_id: exam.id.clone(),
            exam_title: exam.title.clone(),
            exam_creator_id: exam.created_by_user_id.clone(),
            score,
            total_questions: exam.question_count(),
            duration_taken,
            attempt_number,
            timestamp: Utc::now(),
        }
    }
}
