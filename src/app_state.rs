use std::sync::Arc;

use crate::{
    auth::TokenService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        CourseRepository, ExamRepository, MongoCourseRepository, MongoExamRepository,
        MongoResultRepository, MongoUserRepository, ResultRepository, UserRepository,
    },
    services::{AdminService, AuthService, CourseService, ExamService},
};

/// Storage backends the services are wired against.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub exams: Arc<dyn ExamRepository>,
    pub results: Arc<dyn ResultRepository>,
    pub courses: Arc<dyn CourseRepository>,
}

impl Repositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserRepository::new(db)),
            exams: Arc::new(MongoExamRepository::new(db)),
            results: Arc::new(MongoResultRepository::new(db)),
            courses: Arc::new(MongoCourseRepository::new(db)),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.users.ensure_indexes().await?;
        self.exams.ensure_indexes().await?;
        self.results.ensure_indexes().await?;
        self.courses.ensure_indexes().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub exam_service: Arc<ExamService>,
    pub course_service: Arc<CourseService>,
    pub admin_service: Arc<AdminService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let repositories = Repositories::mongo(&db);
        repositories.ensure_indexes().await?;

        let mut state = Self::from_repositories(config, repositories);
        state.db = Some(db);
        Ok(state)
    }

    pub fn from_repositories(config: Config, repositories: Repositories) -> Self {
        let token_service = Arc::new(TokenService::new(
            &config.secret_key,
            config.token_expiration_hours,
        ));

        let auth_service = Arc::new(AuthService::new(
            repositories.users.clone(),
            repositories.courses.clone(),
            token_service.clone(),
        ));
        let exam_service = Arc::new(ExamService::new(
            repositories.exams.clone(),
            repositories.results.clone(),
        ));
        let course_service = Arc::new(CourseService::new(
            repositories.courses.clone(),
            repositories.users.clone(),
        ));
        let admin_service = Arc::new(AdminService::new(
            repositories.users,
            repositories.courses,
            repositories.exams,
            repositories.results,
        ));

        Self {
            token_service,
            auth_service,
            exam_service,
            course_service,
            admin_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
