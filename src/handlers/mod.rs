pub mod admin_handler;
pub mod auth_handler;
pub mod course_handler;
pub mod exam_handler;
pub mod health_handler;

use actix_web::web;

use crate::{errors::AppError, middleware::get_request_id};

pub use health_handler::{health_check, health_check_ready};

/// Registers every HTTP route on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_check)
        .service(health_check_ready)
        .service(auth_handler::register)
        .service(auth_handler::login)
        .service(auth_handler::change_password)
        .service(auth_handler::me)
        .service(exam_handler::list_exams)
        .service(exam_handler::create_exam)
        .service(exam_handler::history)
        .service(exam_handler::export_history)
        .service(exam_handler::teacher_results)
        .service(exam_handler::start_exam)
        .service(exam_handler::manage_exam)
        .service(exam_handler::submit_exam)
        .service(exam_handler::delete_exam)
        .service(course_handler::list_courses)
        .service(course_handler::create_course)
        .service(course_handler::delete_course)
        .service(course_handler::enroll)
        .service(course_handler::materials)
        .service(course_handler::post_announcement)
        .service(admin_handler::stats)
        .service(admin_handler::list_users)
        .service(admin_handler::create_user)
        .service(admin_handler::set_role)
        .service(admin_handler::delete_user);
}

/// Malformed or incomplete JSON bodies surface as the usual error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::debug!(
            "[{}] Rejected JSON body: {}",
            get_request_id(req).unwrap_or_default(),
            err
        );
        AppError::ValidationError(err.to_string()).into()
    })
}
