//! Error types for Ember

use thiserror::Error;

/// The main error type for Ember operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("script error: {0}")]
    ScriptError(String),

    #[error("{phase} hook on '{entity}.{component}' failed: {source}")]
    HookFailed {
        phase: &'static str,
        entity: String,
        component: String,
        #[source]
        source: Box<EngineError>,
    },

    #[error("invalid bindings: {0}")]
    InvalidBindings(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Ember operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::TomlParseError(err.to_string())
    }
}
