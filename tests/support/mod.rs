#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Barrier, RwLock};

use course_exam_server::{
    app_state::{AppState, Repositories},
    auth::hash_password,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Announcement, Course, Exam, ExamResult, User, UserRole},
    repositories::{CourseRepository, ExamRepository, ResultRepository, UserRepository},
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotFound(format!("User with id '{}' not found", id))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' already exists",
                user.username
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut items: Vec<_> = self.users.read().await.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        user.password = password_hash.to_string();
        Ok(())
    }

    async fn update_role(&self, id: &str, role: UserRole) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        user.role = role;
        Ok(())
    }

    async fn add_enrollment(&self, id: &str, course_id: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        if !user.is_enrolled_in(course_id) {
            user.enrolled_courses.push(course_id.to_string());
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryExamRepository {
    exams: RwLock<HashMap<String, Exam>>,
}

#[async_trait]
impl ExamRepository for InMemoryExamRepository {
    async fn create(&self, exam: Exam) -> AppResult<Exam> {
        let mut exams = self.exams.write().await;
        if exams.contains_key(&exam.id) {
            return Err(AppError::AlreadyExists(format!(
                "Exam with id '{}' already exists",
                exam.id
            )));
        }
        exams.insert(exam.id.clone(), exam.clone());
        Ok(exam)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Exam>> {
        Ok(self.exams.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Exam>> {
        let mut items: Vec<_> = self.exams.read().await.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.exams
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Exam with id '{}' not found", id)))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.exams.read().await.len() as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryResultRepository {
    results: RwLock<Vec<ExamResult>>,
}

impl InMemoryResultRepository {
    fn newest_first(mut items: Vec<ExamResult>) -> Vec<ExamResult> {
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn append(&self, result: ExamResult) -> AppResult<ExamResult> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn count_for_taker_and_exam(&self, user_id: &str, exam_id: &str) -> AppResult<u64> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .filter(|r| r.user_id == user_id && r.exam_id == exam_id)
            .count() as u64)
    }

    async fn find_by_taker(&self, user_id: &str) -> AppResult<Vec<ExamResult>> {
        let results = self.results.read().await;
        Ok(Self::newest_first(
            results.iter().filter(|r| r.user_id == user_id).cloned().collect(),
        ))
    }

    async fn find_by_exam_creator(&self, creator_id: &str) -> AppResult<Vec<ExamResult>> {
        let results = self.results.read().await;
        Ok(Self::newest_first(
            results
                .iter()
                .filter(|r| r.exam_creator_id == creator_id)
                .cloned()
                .collect(),
        ))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.results.read().await.len() as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Result ledger that holds every counter read at a barrier until `parties`
/// readers have arrived, forcing concurrent submissions to interleave.
pub struct BarrierResultRepository {
    inner: InMemoryResultRepository,
    barrier: Barrier,
}

impl BarrierResultRepository {
    pub fn new(parties: usize) -> Self {
        Self {
            inner: InMemoryResultRepository::default(),
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl ResultRepository for BarrierResultRepository {
    async fn append(&self, result: ExamResult) -> AppResult<ExamResult> {
        self.inner.append(result).await
    }

    async fn count_for_taker_and_exam(&self, user_id: &str, exam_id: &str) -> AppResult<u64> {
        let count = self.inner.count_for_taker_and_exam(user_id, exam_id).await?;
        self.barrier.wait().await;
        Ok(count)
    }

    async fn find_by_taker(&self, user_id: &str) -> AppResult<Vec<ExamResult>> {
        self.inner.find_by_taker(user_id).await
    }

    async fn find_by_exam_creator(&self, creator_id: &str) -> AppResult<Vec<ExamResult>> {
        self.inner.find_by_exam_creator(creator_id).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.inner.count().await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<HashMap<String, Course>>,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        self.courses
            .write()
            .await
            .insert(course.id.clone(), course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(ids.iter().filter_map(|id| courses.get(id).cloned()).collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Course>> {
        let mut items: Vec<_> = self.courses.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(items)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.courses
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", id)))
    }

    async fn add_announcement(&self, id: &str, announcement: Announcement) -> AppResult<()> {
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", id)))?;
        course.announcements.push(announcement);
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.courses.read().await.len() as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Concrete handles kept alongside the wired state so tests can seed storage directly.
pub struct TestBackend {
    pub users: Arc<InMemoryUserRepository>,
    pub exams: Arc<InMemoryExamRepository>,
    pub results: Arc<InMemoryResultRepository>,
    pub courses: Arc<InMemoryCourseRepository>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            exams: Arc::new(InMemoryExamRepository::default()),
            results: Arc::new(InMemoryResultRepository::default()),
            courses: Arc::new(InMemoryCourseRepository::default()),
        }
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: self.users.clone(),
            exams: self.exams.clone(),
            results: self.results.clone(),
            courses: self.courses.clone(),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::from_repositories(Config::test_config(), self.repositories())
    }

    pub async fn seed_user(&self, username: &str, password: &str, role: UserRole) -> User {
        let hash = hash_password(password).unwrap();
        self.users
            .create(User::new(username, hash, role))
            .await
            .unwrap()
    }

    /// Stores the password as-is, the way accounts created before hashing were kept.
    pub async fn seed_legacy_user(&self, username: &str, password: &str) -> User {
        self.users
            .create(User::new(username, password.to_string(), UserRole::User))
            .await
            .unwrap()
    }
}
