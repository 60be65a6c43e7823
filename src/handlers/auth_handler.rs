use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{ChangePasswordRequest, LoginRequest, RegisterRequest},
        response::{CreatedResponse, CurrentUserResponse, LoginResponse, MessageResponse},
    },
};

#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let id = state.auth_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Registration successful".to_string(),
        id,
    }))
}

#[post("/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let (token, user) = state.auth_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}

#[post("/auth/change-password")]
pub async fn change_password(
    state: web::Data<AppState>,
    request: web::Json<ChangePasswordRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .auth_service
        .change_password(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password changed")))
}

#[get("/auth/me")]
pub async fn me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.auth_service.current_user(&auth.0).await?;
    Ok(HttpResponse::Ok().json(CurrentUserResponse { user }))
}
