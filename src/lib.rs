//! eUsage title-match review
//!
//! Reviews how titles found in harvested COUNTER usage reports were matched
//! to knowledge-base titles, and lets reviewers correct those matches
//! through a REST JSON API backed by eusage-reports.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod reports;
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
