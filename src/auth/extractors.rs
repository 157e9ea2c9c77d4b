use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::app::AppContext;
use crate::auth::token::verify_token;
use crate::error::AppError;

/// Id of the user the request's bearer token was issued to.
///
/// Adding this extractor to a handler signature makes the route require a
/// valid `Authorization: Bearer <token>` header; a missing, malformed or
/// expired token answers with 401 through the terminal error responder.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUserId(pub i32);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Into::into))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUserId, AppError> {
    let ctx = req
        .app_data::<web::Data<AppContext>>()
        .ok_or_else(|| AppError::internal("application context not registered"))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("missing bearer token"))?;

    let claims = verify_token(token, &ctx.config.jwt_secret)?;
    Ok(AuthenticatedUserId(claims.sub))
}
