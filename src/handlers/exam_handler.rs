use actix_web::{delete, get, http::header, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, QueryTokenUser},
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        exam_dto::SubmitExamResponse,
        request::{CreateExamRequest, StartExamRequest, SubmitExamRequest},
        response::{CreatedResponse, MessageResponse},
    },
};

#[get("/exams")]
pub async fn list_exams(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let exams = state.exam_service.list().await?;
    Ok(HttpResponse::Ok().json(exams))
}

#[post("/exams")]
pub async fn create_exam(
    state: web::Data<AppState>,
    request: web::Json<CreateExamRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    let id = state
        .exam_service
        .create(&caller, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Exam created".to_string(),
        id,
    }))
}

#[get("/exams/history")]
pub async fn history(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state.exam_service.history(auth.0.user_id()).await?;
    Ok(HttpResponse::Ok().json(results))
}

/// Download link variant of the history endpoint; the token travels in `?token=`.
#[get("/exams/history/export")]
pub async fn export_history(
    state: web::Data<AppState>,
    auth: QueryTokenUser,
) -> Result<HttpResponse, AppError> {
    let results = state.exam_service.history(auth.0.user_id()).await?;
    Ok(HttpResponse::Ok()
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"exam-history.json\"",
        ))
        .json(results))
}

#[get("/exams/teacher-results")]
pub async fn teacher_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state.exam_service.teacher_results(auth.0.user_id()).await?;
    Ok(HttpResponse::Ok().json(results))
}

/// The body is optional and read regardless of content type. An empty body means
/// no password; anything else must be a valid `{password}` object.
fn parse_start_request(req: &HttpRequest, body: &[u8]) -> Result<StartExamRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StartExamRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        log::debug!(
            "[{}] Rejected start body: {}",
            get_request_id(req).unwrap_or_default(),
            e
        );
        AppError::ValidationError(format!("Invalid request body: {}", e))
    })
}

#[post("/exams/{id}/start")]
pub async fn start_exam(
    state: web::Data<AppState>,
    id: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let request = parse_start_request(&req, &body)?;
    let exam = state
        .exam_service
        .start(&id, request.password.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(exam))
}

#[get("/exams/{id}/manage")]
pub async fn manage_exam(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    let exam = state.exam_service.manage(&caller, &id).await?;
    Ok(HttpResponse::Ok().json(exam))
}

#[post("/exams/{id}/submit")]
pub async fn submit_exam(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitExamRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .exam_service
        .submit(auth.0.user_id(), &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(SubmitExamResponse {
        message: "Exam submitted".to_string(),
        result,
    }))
}

#[delete("/exams/{id}")]
pub async fn delete_exam(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.auth_service.resolve_caller(&auth.0).await?;
    state.exam_service.delete(&caller, &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Exam deleted")))
}
