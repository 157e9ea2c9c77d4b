pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::{web, HttpResponse};

use crate::error::AppError;

/// Mounts the route groups: auth under its own prefix, tasks and users at
/// the root, the health probe, and a JSON 404 for everything unmatched.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login),
        )
        .service(
            web::scope("/tasks")
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        )
        .service(
            web::scope("/users")
                .service(users::current_user)
                .service(users::list_users),
        )
        .default_service(web::route().to(fallback));
}

async fn fallback() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found("no route matches the requested path"))
}
