//! Matching engine error types

use std::fmt;

/// Errors raised by the engine lifecycle and configuration
#[derive(Debug)]
pub enum EngineError {
    /// `start` was called while the matching thread is running
    AlreadyRunning,

    /// The matching thread could not be spawned
    WorkerSpawn {
        /// Description of the error
        message: String,
    },

    /// The matching thread panicked before it was joined
    WorkerPanicked,

    /// A configuration document could not be parsed
    InvalidConfig {
        /// Description of the error
        message: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::AlreadyRunning => write!(f, "Matching engine is already running"),
            EngineError::WorkerSpawn { message } => {
                write!(f, "Failed to spawn matching thread: {}", message)
            }
            EngineError::WorkerPanicked => write!(f, "Matching thread panicked"),
            EngineError::InvalidConfig { message } => {
                write!(f, "Invalid engine configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for EngineError {}
