//! Application context and the pieces of the request pipeline that are pure
//! configuration: the CORS layer and the JSON body parser.

use actix_cors::Cors;
use actix_web::{http::Method, web};
use sqlx::PgPool;

use crate::config::Config;
use crate::error::AppError;

/// Shared state for the whole application, built once at startup and injected
/// into every handler and extractor through `web::Data`.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub pool: PgPool,
}

impl AppContext {
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self { config, pool }
    }
}

/// CORS policy.
///
/// Requests without an `Origin` header are not CORS requests and pass
/// untouched (curl, server-to-server, mobile clients). For browser requests
/// the behavior depends on configuration: with `CORS_ALLOWED_ORIGINS` set
/// only the listed origins are allowed; without it every presented origin is
/// reflected back. Reflect-any plus credentials is permissive and kept only
/// because existing clients depend on it; production deployments should set
/// the allow-list.
pub fn cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_any_header()
        .supports_credentials();

    match &config.allowed_origins {
        Some(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
        None => cors.allowed_origin_fn(|_origin, _req_head| true),
    }
}

/// JSON body extraction. Parse failures are re-shaped into [`AppError`] so
/// a malformed body produces the standard error payload instead of the
/// framework's default response.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(100 * 1024)
        .error_handler(|err, _req| AppError::from(err).into())
}
