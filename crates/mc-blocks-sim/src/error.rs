use thiserror::Error;

/// Errors raised while starting the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}
