/// Convenience result type used across scrollsync.
pub type ScrollResult<T> = Result<T, ScrollError>;

/// Error taxonomy for scene construction and collaborator wiring.
///
/// None of these ever reach the page: each component initializes in isolation and a failure
/// only removes that one component (see [`crate::ScrollScene::build`]).
#[derive(thiserror::Error, Debug)]
pub enum ScrollError {
    /// Malformed segment ranges, zero-length trigger regions, invalid tuning values.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A platform primitive (visibility observer, animation engine) is absent.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// A referenced element or resource does not exist in the current page.
    #[error("missing target: {0}")]
    MissingTarget(String),

    /// Errors when serializing or deserializing configuration documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollError {
    /// Build a [`ScrollError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ScrollError::CollaboratorUnavailable`] value.
    pub fn collaborator_unavailable(msg: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable(msg.into())
    }

    /// Build a [`ScrollError::MissingTarget`] value.
    pub fn missing_target(msg: impl Into<String>) -> Self {
        Self::MissingTarget(msg.into())
    }

    /// Build a [`ScrollError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
