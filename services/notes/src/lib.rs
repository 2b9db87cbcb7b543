//! Epic Notes service
//!
//! Users own notes and notes carry images. Loaders answer `GET` requests with
//! page data as JSON; actions handle form posts and redirect on success.

pub mod config;
pub mod csrf;
pub mod error;
pub mod forms;
pub mod honeypot;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use routes::create_router;
pub use state::AppState;
