use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{AnnouncementRequest, CreateCourseRequest},
        response::{CreatedResponse, MessageResponse},
    },
};

#[get("/courses")]
pub async fn list_courses(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let courses = state.course_service.list().await?;
    Ok(HttpResponse::Ok().json(courses))
}

#[post("/courses")]
pub async fn create_course(
    state: web::Data<AppState>,
    request: web::Json<CreateCourseRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    let id = state
        .course_service
        .create(&caller, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Course created".to_string(),
        id,
    }))
}

#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    state.course_service.delete(&caller, &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Course deleted")))
}

#[post("/courses/{id}/enroll")]
pub async fn enroll(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.auth_service.authenticated_user(&auth.0).await?;
    state.course_service.enroll(&user.id, &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Enrolled")))
}

#[get("/courses/{id}/materials")]
pub async fn materials(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.auth_service.authenticated_user(&auth.0).await?;
    let materials = state.course_service.materials(&user, &id).await?;
    Ok(HttpResponse::Ok().json(materials))
}

#[post("/courses/{id}/announcements")]
pub async fn post_announcement(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<AnnouncementRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    state
        .course_service
        .post_announcement(&caller, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Announcement posted")))
}
