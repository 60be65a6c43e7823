use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{authorize, Action, Caller, Resource, ResourceKind},
    errors::{AppError, AppResult},
    models::{
        domain::{exam::DEFAULT_DURATION_MINUTES, Exam, ExamResult},
        dto::{
            exam_dto::{ExamSummary, ExamView, ResultView, ScoreResult},
            request::{CreateExamRequest, SubmitExamRequest},
        },
    },
    repositories::{ExamRepository, ResultRepository},
    services::exam_attempt_service::ExamAttemptService,
};

pub struct ExamService {
    exams: Arc<dyn ExamRepository>,
    results: Arc<dyn ResultRepository>,
}

impl ExamService {
    pub fn new(exams: Arc<dyn ExamRepository>, results: Arc<dyn ResultRepository>) -> Self {
        Self { exams, results }
    }

    async fn get_exam(&self, id: &str) -> AppResult<Exam> {
        self.exams
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Exam with id '{}' not found", id)))
    }

    /// The password, if any, is stored verbatim. It is a room code, not a secret.
    pub async fn create(&self, caller: &Caller, request: CreateExamRequest) -> AppResult<String> {
        authorize(
            Some(caller),
            &Resource::of_kind(ResourceKind::Exam),
            Action::Create,
        )?;
        request.validate()?;

        let exam = Exam::new(
            &request.title,
            request.description.as_deref().unwrap_or_default(),
            request.duration.unwrap_or(DEFAULT_DURATION_MINUTES),
            request.questions.into_iter().map(Into::into).collect(),
            request.password,
            &caller.id,
            &caller.username,
        );
        let exam = self.exams.create(exam).await?;

        log::info!(
            "Exam '{}' ({}) created by '{}'",
            exam.title,
            exam.id,
            caller.username
        );
        Ok(exam.id)
    }

    pub async fn list(&self) -> AppResult<Vec<ExamSummary>> {
        let exams = self.exams.find_all().await?;
        Ok(exams.iter().map(ExamSummary::from).collect())
    }

    pub async fn start(&self, id: &str, password: Option<&str>) -> AppResult<ExamView> {
        let exam = self.get_exam(id).await?;

        if !exam.admits(password) {
            return Err(AppError::Forbidden("Incorrect exam password".to_string()));
        }

        Ok(ExamView::from(&exam))
    }

    /// Full exam including the answer key and the plaintext password.
    pub async fn manage(&self, caller: &Caller, id: &str) -> AppResult<Exam> {
        let exam = self.get_exam(id).await?;
        authorize(Some(caller), &Resource::exam(&exam), Action::ViewPrivileged)?;
        Ok(exam)
    }

    pub async fn delete(&self, caller: &Caller, id: &str) -> AppResult<()> {
        let exam = self.get_exam(id).await?;
        authorize(Some(caller), &Resource::exam(&exam), Action::Delete)?;

        self.exams.delete(&exam.id).await?;

        log::info!("Exam '{}' deleted by '{}'", exam.id, caller.username);
        Ok(())
    }

    /// Grades a submission and appends it to the ledger.
    ///
    /// The attempt number is the prior count plus one, read and then written
    /// without a transaction. Two concurrent submissions by the same taker for the
    /// same exam can observe the same count and share an attempt number.
    pub async fn submit(
        &self,
        taker_id: &str,
        exam_id: &str,
        request: SubmitExamRequest,
    ) -> AppResult<ScoreResult> {
        let exam = self.get_exam(exam_id).await?;

        let score = ExamAttemptService::grade(&exam, &request.answers);

        let prior = self
            .results
            .count_for_taker_and_exam(taker_id, &exam.id)
            .await?;
        let attempt_number = prior as i32 + 1;

        let result = ExamResult::new(
            taker_id,
            &exam,
            score,
            request.duration_taken,
            attempt_number,
        );
        let result = self.results.append(result).await?;

        log::info!(
            "User '{}' scored {}/{} on exam '{}' (attempt {})",
            taker_id,
            result.score,
            result.total_questions,
            exam.id,
            result.attempt_number
        );

        Ok(ScoreResult {
            score: result.score,
            total: result.total_questions,
            attempt: result.attempt_number,
        })
    }

    pub async fn history(&self, taker_id: &str) -> AppResult<Vec<ResultView>> {
        let results = self.results.find_by_taker(taker_id).await?;
        Ok(results.into_iter().map(ResultView::from).collect())
    }

    /// Attempts on exams authored by the caller, found through the creator id
    /// copied onto each result.
    pub async fn teacher_results(&self, creator_id: &str) -> AppResult<Vec<ResultView>> {
        let results = self.results.find_by_exam_creator(creator_id).await?;
        Ok(results.into_iter().map(ResultView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            domain::{Question, UserRole},
            dto::request::QuestionRequest,
        },
        repositories::{
            exam_repository::MockExamRepository, result_repository::MockResultRepository,
        },
    };

    fn caller(id: &str, role: UserRole) -> Caller {
        Caller {
            id: id.to_string(),
            username: id.to_string(),
            role,
        }
    }

    fn exam_request() -> CreateExamRequest {
        CreateExamRequest {
            title: "Final".to_string(),
            description: None,
            duration: None,
            questions: vec![QuestionRequest {
                question: "2 + 2".to_string(),
                options: vec!["3".to_string(), "4".to_string()],
                correct_index: 1,
            }],
            password: Some("Room-1".to_string()),
        }
    }

    fn stored_exam() -> Exam {
        Exam::new(
            "Final",
            "",
            30,
            vec![Question {
                question: "2 + 2".to_string(),
                options: vec!["3".to_string(), "4".to_string()],
                correct_index: 1,
            }],
            None,
            "t1",
            "t1",
        )
    }

    #[tokio::test]
    async fn test_create_forbidden_for_user_role() {
        let mut exams = MockExamRepository::new();
        exams.expect_create().never();
        let service = ExamService::new(Arc::new(exams), Arc::new(MockResultRepository::new()));

        let result = service
            .create(&caller("u1", UserRole::User), exam_request())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_denormalizes_creator_and_defaults_duration() {
        let mut exams = MockExamRepository::new();
        exams
            .expect_create()
            .withf(|exam: &Exam| {
                exam.created_by_user_id == "t1"
                    && exam.creator_name == "t1"
                    && exam.duration == DEFAULT_DURATION_MINUTES
                    && exam.password.as_deref() == Some("Room-1")
            })
            .times(1)
            .returning(|exam| Ok(exam));
        let service = ExamService::new(Arc::new(exams), Arc::new(MockResultRepository::new()));

        let id = service
            .create(&caller("t1", UserRole::Teacher), exam_request())
            .await
            .unwrap();
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_submit_unknown_exam_is_not_found() {
        let mut exams = MockExamRepository::new();
        exams.expect_find_by_id().returning(|_| Ok(None));
        let mut results = MockResultRepository::new();
        results.expect_append().never();
        let service = ExamService::new(Arc::new(exams), Arc::new(results));

        let result = service
            .submit("u1", "missing", SubmitExamRequest::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_numbers_attempt_from_prior_count() {
        let exam = stored_exam();
        let mut exams = MockExamRepository::new();
        exams
            .expect_find_by_id()
            .returning(move |_| Ok(Some(exam.clone())));

        let mut results = MockResultRepository::new();
        results
            .expect_count_for_taker_and_exam()
            .returning(|_, _| Ok(4));
        results
            .expect_append()
            .withf(|r: &ExamResult| r.attempt_number == 5 && r.exam_creator_id == "t1")
            .times(1)
            .returning(|r| Ok(r));
        let service = ExamService::new(Arc::new(exams), Arc::new(results));

        let score = service
            .submit("u1", "any", SubmitExamRequest::default())
            .await
            .unwrap();
        assert_eq!(score.attempt, 5);
        assert_eq!(score.score, 0);
        assert_eq!(score.total, 1);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_database_error() {
        let mut exams = MockExamRepository::new();
        exams
            .expect_find_all()
            .returning(|| Err(AppError::DatabaseError("timeout".to_string())));
        let service = ExamService::new(Arc::new(exams), Arc::new(MockResultRepository::new()));

        assert!(matches!(
            service.list().await,
            Err(AppError::DatabaseError(_))
        ));
    }
}
