//! Shopslot
//!
//! Availability and schedule server of a beauty-service booking marketplace:
//! computes bookable slots per shop and date, and lets shop owners maintain
//! weekly hours, blocked slots and holidays through a REST JSON API.

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
