//! Error types for the fallible edges of the engine.
//!
//! Evaluation and search themselves never fail; only loading positions,
//! loading ensemble configuration and building the worker pool do.

use shakmaty::fen::ParseFenError;
use shakmaty::{Chess, PositionError};
use thiserror::Error;

/// Errors that can occur outside the search core
#[derive(Error, Debug)]
pub enum EngineError {
    /// FEN text could not be parsed
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] ParseFenError),

    /// FEN parsed but describes an illegal position
    #[error("Illegal position: {0}")]
    InvalidPosition(#[from] PositionError<Chess>),

    /// Ensemble configuration failed validation
    #[error("Invalid ensemble configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration file is not valid TOML for the expected schema
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl EngineError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        EngineError::InvalidConfig { message: message.into() }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
