use thiserror::Error;

/// Invalid or missing configuration, detected before any loop starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkerCount(usize),

    #[error("Invalid amount range: min {min} must be a non-negative number not above max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("Invalid percentage: {0} (expected a fraction between 0 and 1)")]
    InvalidPercentage(f64),
}
