use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{authorize, hash_password, Action, Caller, Resource, ResourceKind},
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole},
        dto::{
            request::AdminCreateUserRequest,
            response::{StatsResponse, UserDto},
        },
    },
    repositories::{CourseRepository, ExamRepository, ResultRepository, UserRepository},
};

/// Admin dashboard operations. Every call is gated on the caller's role through the policy.
pub struct AdminService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    exams: Arc<dyn ExamRepository>,
    results: Arc<dyn ResultRepository>,
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        exams: Arc<dyn ExamRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            users,
            courses,
            exams,
            results,
        }
    }

    pub async fn stats(&self, caller: &Caller) -> AppResult<StatsResponse> {
        authorize(
            Some(caller),
            &Resource::of_kind(ResourceKind::Platform),
            Action::ViewPrivileged,
        )?;

        Ok(StatsResponse {
            users: self.users.count().await?,
            courses: self.courses.count().await?,
            exams: self.exams.count().await?,
            results: self.results.count().await?,
        })
    }

    pub async fn list_users(&self, caller: &Caller) -> AppResult<Vec<UserDto>> {
        authorize(
            Some(caller),
            &Resource::of_kind(ResourceKind::User),
            Action::ViewPrivileged,
        )?;

        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn create_user(
        &self,
        caller: &Caller,
        request: AdminCreateUserRequest,
    ) -> AppResult<String> {
        authorize(
            Some(caller),
            &Resource::of_kind(ResourceKind::User),
            Action::Create,
        )?;
        request.validate()?;

        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }

        let user = User::new(
            &request.username,
            hash_password(&request.password)?,
            request.role.unwrap_or_default(),
        );
        let user = self.users.create(user).await?;

        log::info!(
            "Admin '{}' created user '{}' with role {}",
            caller.username,
            user.username,
            user.role
        );
        Ok(user.id)
    }

    pub async fn set_role(&self, caller: &Caller, user_id: &str, role: UserRole) -> AppResult<()> {
        authorize(
            Some(caller),
            &Resource::of_kind(ResourceKind::User),
            Action::Update,
        )?;

        self.users.update_role(user_id, role).await?;
        log::info!(
            "Admin '{}' set role of user '{}' to {}",
            caller.username,
            user_id,
            role
        );
        Ok(())
    }

    pub async fn delete_user(&self, caller: &Caller, user_id: &str) -> AppResult<()> {
        authorize(
            Some(caller),
            &Resource::of_kind(ResourceKind::User),
            Action::Delete,
        )?;

        self.users.delete(user_id).await?;
        log::info!("Admin '{}' deleted user '{}'", caller.username, user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        course_repository::MockCourseRepository, exam_repository::MockExamRepository,
        result_repository::MockResultRepository, user_repository::MockUserRepository,
    };

    fn caller(role: UserRole) -> Caller {
        Caller {
            id: "c1".to_string(),
            username: "c1".to_string(),
            role,
        }
    }

    fn service(users: MockUserRepository) -> AdminService {
        let mut courses = MockCourseRepository::new();
        courses.expect_count().returning(|| Ok(2));
        let mut exams = MockExamRepository::new();
        exams.expect_count().returning(|| Ok(3));
        let mut results = MockResultRepository::new();
        results.expect_count().returning(|| Ok(4));

        AdminService::new(
            Arc::new(users),
            Arc::new(courses),
            Arc::new(exams),
            Arc::new(results),
        )
    }

    #[tokio::test]
    async fn test_stats_for_admin() {
        let mut users = MockUserRepository::new();
        users.expect_count().returning(|| Ok(1));

        let stats = service(users).stats(&caller(UserRole::Admin)).await.unwrap();
        assert_eq!(
            stats,
            StatsResponse {
                users: 1,
                courses: 2,
                exams: 3,
                results: 4
            }
        );
    }

    #[tokio::test]
    async fn test_teacher_cannot_use_admin_operations() {
        let mut users = MockUserRepository::new();
        users.expect_find_all().never();
        users.expect_delete().never();
        users.expect_update_role().never();
        let service = service(users);
        let teacher = caller(UserRole::Teacher);

        assert!(matches!(
            service.stats(&teacher).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.list_users(&teacher).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete_user(&teacher, "u1").await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.set_role(&teacher, "c1", UserRole::Admin).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_create_user_with_requested_role() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|user: &User| user.role == UserRole::Teacher && user.password != "pw")
            .times(1)
            .returning(|user| Ok(user));

        let id = service(users)
            .create_user(
                &caller(UserRole::Admin),
                AdminCreateUserRequest {
                    username: "newteacher".to_string(),
                    password: "pw".to_string(),
                    role: Some(UserRole::Teacher),
                },
            )
            .await
            .unwrap();
        assert!(!id.is_empty());
    }
}
