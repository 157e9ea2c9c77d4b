use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{app::AppContext, auth::AuthenticatedUserId, error::AppError, models::User};

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Case-insensitive match against username and email.
    pub search: Option<String>,
}

/// Lists user accounts, optionally filtered by a search term.
#[get("")]
pub async fn list_users(
    ctx: web::Data<AppContext>,
    query: web::Query<UserQuery>,
    _user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let users: Vec<User> = match &query.search {
        Some(term) => {
            sqlx::query_as(
                "SELECT id, username, email, created_at FROM users \
                 WHERE username ILIKE $1 OR email ILIKE $1 ORDER BY id",
            )
            .bind(format!("%{}%", term))
            .fetch_all(&ctx.pool)
            .await?
        }
        None => {
            sqlx::query_as("SELECT id, username, email, created_at FROM users ORDER BY id")
                .fetch_all(&ctx.pool)
                .await?
        }
    };

    Ok(HttpResponse::Ok().json(users))
}

/// Profile of the authenticated user.
#[get("/me")]
pub async fn current_user(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let profile: Option<User> =
        sqlx::query_as("SELECT id, username, email, created_at FROM users WHERE id = $1")
            .bind(user.0)
            .fetch_optional(&ctx.pool)
            .await?;

    match profile {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(AppError::not_found("user not found")),
    }
}
