use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    auth::Claims,
    errors::{AppError, AppResult},
};

fn token_service(req: &HttpRequest) -> AppResult<&crate::auth::TokenService> {
    req.app_data::<web::Data<AppState>>()
        .map(|state| state.token_service.as_ref())
        .ok_or_else(|| AppError::InternalError("Token service not configured".to_string()))
}

fn claims_from_header(req: &HttpRequest) -> AppResult<Claims> {
    let tokens = token_service(req)?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    tokens.validate_header(header)
}

/// Extractor for a caller holding a valid bearer token.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_header(req).map(AuthenticatedUser))
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: String,
}

/// Accepts the token from a `?token=` query parameter.
///
/// Only for plain download links that cannot set headers. Use it on read-only
/// endpoints that return the caller's own non-sensitive data, nowhere else.
pub struct QueryTokenUser(pub Claims);

impl FromRequest for QueryTokenUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = token_service(req).and_then(|tokens| {
            let query = web::Query::<TokenQuery>::from_query(req.query_string())
                .map_err(|_| AppError::Unauthorized("Missing token".to_string()))?;
            tokens.validate(&query.token)
        });

        ready(result.map(QueryTokenUser))
    }
}
