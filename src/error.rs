//! Error types for the grid robot simulation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Malformed interior matrix, bad generation parameters, or no open cell to stand on
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("The robot should be in the field.")]
    NotPlaced,

    #[error("Cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i32, col: i32 },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Movement log error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SimError {
    fn from(e: toml::de::Error) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
