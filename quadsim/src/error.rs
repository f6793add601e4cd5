//! Error types for quadsim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid body {index}: {reason}")]
    InvalidBody { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, SimError>;
