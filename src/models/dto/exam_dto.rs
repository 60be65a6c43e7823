use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Exam, ExamResult, Question};

/// Public listing entry. Carries only whether a password exists, never its value,
/// and no question bodies.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExamSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub question_count: i32,
    pub has_password: bool,
    pub creator_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Exam> for ExamSummary {
    fn from(exam: &Exam) -> Self {
        ExamSummary {
            id: exam.id.clone(),
            title: exam.title.clone(),
            description: exam.description.clone(),
            duration: exam.duration,
            question_count: exam.question_count(),
            has_password: exam.has_password(),
            creator_name: exam.creator_name.clone(),
            created_at: exam.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        QuestionView {
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }
}

/// What a taker sees after starting an exam: prompts and options, no answer key.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExamView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub creator_name: String,
    pub questions: Vec<QuestionView>,
}

impl From<&Exam> for ExamView {
    fn from(exam: &Exam) -> Self {
        ExamView {
            id: exam.id.clone(),
            title: exam.title.clone(),
            description: exam.description.clone(),
            duration: exam.duration,
            creator_name: exam.creator_name.clone(),
            questions: exam.questions.iter().map(QuestionView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: i32,
    pub total: i32,
    pub attempt: i32,
}

/// A ledger entry as shown to its taker or to the exam's author.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResultView {
    pub id: String,
    pub user_id: String,
    pub exam_id: String,
    pub exam_title: String,
    pub score: i32,
    pub total_questions: i32,
    pub duration_taken: i64,
    pub attempt_number: i32,
    pub timestamp: DateTime<Utc>,
}

impl From<ExamResult> for ResultView {
    fn from(result: ExamResult) -> Self {
        ResultView {
            id: result.id,
            user_id: result.user_id,
            exam_id: result.exam_id,
            exam_title: result.exam_title,
            score: result.score,
            total_questions: result.total_questions,
            duration_taken: result.duration_taken,
            attempt_number: result.attempt_number,
            timestamp: result.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitExamResponse {
    pub message: String,
    #[serde(flatten)]
    pub result: ScoreResult,
}
