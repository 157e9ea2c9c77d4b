//! Library crate for the task-management API server.
//!
//! Everything the binary needs lives here: configuration, the shared
//! application context, the request middleware, the three route groups
//! (auth, tasks, users) and the error type that terminates the request
//! pipeline. `main.rs` only assembles these pieces and runs the server.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

pub use app::AppContext;
pub use config::Config;
pub use error::AppError;
