use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{check_credential, hash_password, Caller, Claims, CredentialMatch, TokenService},
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole},
        dto::{
            request::{ChangePasswordRequest, LoginRequest, RegisterRequest},
            response::{CourseSummary, UserProfile, UserSummary},
        },
    },
    repositories::{CourseRepository, UserRepository},
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            courses,
            tokens,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<String> {
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
            UserRole::User,
        );
        let user = self.users.create(user).await?;

        log::info!("Registered user '{}' ({})", user.username, user.id);
        Ok(user.id)
    }

    /// Verifies the password and issues a token.
    ///
    /// A legacy plaintext credential is accepted once and replaced with a hash
    /// before the response is produced. If that write fails the login still succeeds
    /// and the migration is retried on the next login.
    pub async fn login(&self, request: LoginRequest) -> AppResult<(String, UserSummary)> {
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        match check_credential(&request.password, &user.password) {
            CredentialMatch::Hashed => {}
            CredentialMatch::LegacyPlaintext => {
                self.migrate_legacy_credential(&user, &request.password)
                    .await;
            }
            CredentialMatch::Mismatch => {
                log::warn!("Failed login for '{}'", request.username);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        }

        let token = self.tokens.issue(&user)?;
        Ok((token, UserSummary::from(&user)))
    }

    async fn migrate_legacy_credential(&self, user: &User, password: &str) {
        let migrated = match hash_password(password) {
            Ok(hash) => self.users.update_password(&user.id, &hash).await,
            Err(e) => Err(e),
        };

        match migrated {
            Ok(()) => log::info!("Migrated legacy credential for '{}'", user.username),
            Err(e) => log::warn!(
                "Could not migrate legacy credential for '{}': {}",
                user.username,
                e
            ),
        }
    }

    pub async fn change_password(
        &self,
        claims: &Claims,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        let user = self.authenticated_user(claims).await?;

        if !check_credential(&request.old_password, &user.password).is_match() {
            return Err(AppError::BadRequest(
                "Old password is incorrect".to_string(),
            ));
        }

        let hash = hash_password(&request.new_password)?;
        self.users.update_password(&user.id, &hash).await?;

        log::info!("Password changed for '{}'", user.username);
        Ok(())
    }

    pub async fn current_user(&self, claims: &Claims) -> AppResult<UserProfile> {
        let user = self.authenticated_user(claims).await?;

        let enrolled_courses_details = self
            .courses
            .find_by_ids(&user.enrolled_courses)
            .await?
            .into_iter()
            .map(CourseSummary::from)
            .collect();

        Ok(UserProfile {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            enrolled_courses_details,
        })
    }

    /// Loads the user behind a validated token. A token for a deleted user is
    /// treated like an invalid token.
    pub async fn authenticated_user(&self, claims: &Claims) -> AppResult<User> {
        self.users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }

    pub async fn resolve_caller(&self, claims: &Claims) -> AppResult<Caller> {
        let user = self.authenticated_user(claims).await?;
        Ok(Caller::from(&user))
    }
}
