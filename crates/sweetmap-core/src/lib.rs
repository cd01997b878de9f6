//! Shared domain types and configuration for SweetMap venue discovery.

pub mod app_config;
pub mod config;
pub mod exclusions;
pub mod request;
pub mod venue;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use exclusions::{load_exclusion_rules, normalize_name, parse_exclusion_rules, ExclusionRules};
pub use request::{LatLng, SearchRequest, ValidationError, DEFAULT_MAX_RADIUS_METERS};
pub use venue::{venue_id, Venue, ADDRESS_UNKNOWN};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read exclusion rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse exclusion rules: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("invalid exclusion rules: {0}")]
    Validation(String),
}
