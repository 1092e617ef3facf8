use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    // The AFD file exists but could not be decoded as text.
    #[error("AFD read error: {0}")]
    AfdReadError(String),
}

impl EngineError {
    /// Exit code the command line driver reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::ConfigError(_) | EngineError::JsonError { .. } => 78,
            EngineError::IoError { .. } | EngineError::AfdReadError(_) => 66,
        }
    }
}
