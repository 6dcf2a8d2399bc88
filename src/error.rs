use thiserror::Error;

/// Audio errors using thiserror for structured error handling.
///
/// None of these reach gameplay code through the playback operations: the
/// manager recovers from them locally (hard cut) and logs a warning. They are
/// returned from construction, loading and configuration paths.

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Invalid transition duration: {0}s (must be positive and finite)")]
    InvalidTransitionDuration(f32),

    #[error("No active music channel: both music channels are playing")]
    NoActiveChannel,

    #[error("Global audio manager is already initialized")]
    AlreadyInitialized,

    #[error("Failed to load audio clip: {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode audio format")]
    DecodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the platform config directory")]
    NoConfigDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
