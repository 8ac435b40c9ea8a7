//! LocalLibrary Catalog Server
//!
//! A Rust implementation of the LocalLibrary catalog server, providing a REST
//! JSON API for browsing books, authors and genres, and for tracking loanable
//! book copies through their loan lifecycle.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
