use fleet_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("environment: {0}")]
    World(#[from] WorldError),

    /// A well-formed value that violates a schema rule, with enough context
    /// to find it in the file.
    #[error("{0}")]
    Invalid(String),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Shorthand for schema-rule violations.
pub(crate) fn invalid(msg: impl Into<String>) -> ScenarioError {
    ScenarioError::Invalid(msg.into())
}
