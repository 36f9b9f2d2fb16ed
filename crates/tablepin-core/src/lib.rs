//! Shared domain model for the tablepin workspace: business records, menu
//! entries, users, session context, geo math, and application configuration.

pub mod app_config;
pub mod business;
pub mod config;
pub mod geo;
pub mod session;
pub mod users;

pub use app_config::{AppConfig, Environment};
pub use business::{BusinessRecord, LngLat, MenuEntry, MenuKind, Review, ReviewDraft};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, format_distance, Coordinates};
pub use session::SessionContext;
pub use users::{Role, User};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid role: {0}")]
    InvalidRole(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
