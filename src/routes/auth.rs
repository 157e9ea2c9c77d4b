use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

use crate::{
    app::AppContext,
    auth::{generate_token, hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    middleware::ClientAddr,
};

/// Creates an account and returns a fresh access token.
#[post("/register")]
pub async fn register(
    ctx: web::Data<AppContext>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&ctx.pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::bad_request("email already registered"));
    }

    let password_hash = hash_password(&payload.password)?;

    let (user_id,): (i32,) = sqlx::query_as(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&ctx.pool)
    .await?;

    let token = generate_token(user_id, &ctx.config.jwt_secret)?;

    Ok(HttpResponse::Created().json(AuthResponse { token, user_id }))
}

/// Exchanges credentials for an access token.
///
/// Lookup failure and password mismatch answer identically so the endpoint
/// does not reveal which accounts exist.
#[post("/login")]
pub async fn login(
    ctx: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
    addr: ClientAddr,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    log::info!("login attempt for {} from {}", payload.email, addr);

    let row: Option<(i32, String)> =
        sqlx::query_as("SELECT id, password_hash FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&ctx.pool)
            .await?;

    match row {
        Some((user_id, password_hash)) => {
            if verify_password(&payload.password, &password_hash)? {
                let token = generate_token(user_id, &ctx.config.jwt_secret)?;
                Ok(HttpResponse::Ok().json(AuthResponse { token, user_id }))
            } else {
                Err(AppError::unauthorized("invalid credentials"))
            }
        }
        None => Err(AppError::unauthorized("invalid credentials")),
    }
}
