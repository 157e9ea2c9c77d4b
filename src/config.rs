use std::env;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// URL of the browser client. Parsed for parity with existing
    /// deployments; nothing in the pipeline consumes it yet.
    pub client_url: String,
    pub jwt_secret: String,
    /// Optional CORS allow-list. `None` means every presented origin is
    /// reflected back (the historical behavior).
    pub allowed_origins: Option<Vec<String>>,
}

const DEFAULT_PORT: u16 = 3030;
const DEFAULT_DATABASE_URL: &str = "postgres://taskmanager-db:5432/taskmanager";
const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .expect("PORT must be a number"),
            client_url: env::var("CLIENT_URL").unwrap_or_else(|_| DEFAULT_CLIENT_URL.to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS").ok().map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            }),
        }
    }
}
