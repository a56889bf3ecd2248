use thiserror::Error;

/// Errors from setup-time operations (profile parsing, config loading).
///
/// Nothing on the per-tick path returns this type: gameplay failures are
/// clamped, rejected as no-ops, or sampled as ordinary outcomes.
#[derive(Error, Debug)]
pub enum ActorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {field} ({reason})")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown attribute: {name}")]
    UnknownAttribute { name: String },
}

impl ActorError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        ActorError::InvalidConfig { field, reason: reason.into() }
    }

    /// Whether a caller can reasonably fall back to defaults and keep going.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ActorError::Io(_) => true,
            ActorError::Json(_) | ActorError::Yaml(_) => true,
            ActorError::InvalidProfile(_) => true,
            ActorError::InvalidConfig { .. } => false,
            ActorError::UnknownAttribute { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ActorError>;
