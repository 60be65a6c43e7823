use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{AdminCreateUserRequest, UpdateRoleRequest},
        response::{CreatedResponse, MessageResponse},
    },
};

#[get("/admin/stats")]
pub async fn stats(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    let stats = state.admin_service.stats(&caller).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    let users = state.admin_service.list_users(&caller).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("/admin/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<AdminCreateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    let id = state
        .admin_service
        .create_user(&caller, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "User created".to_string(),
        id,
    }))
}

#[put("/admin/users/{id}/role")]
pub async fn set_role(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateRoleRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    state
        .admin_service
        .set_role(&caller, &id, request.role)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Role updated")))
}

#[delete("/admin/users/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    state.admin_service.delete_user(&caller, &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted")))
}
