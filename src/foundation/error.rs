/// Convenience result type used across algoscene.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by scene, evaluation and render APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// An index fell outside a cell collection or grid.
    #[error("index out of range: {index} (len {len})")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Length of the indexed container at the time of the call.
        len: usize,
    },

    /// Programmer misuse of an API (inverted ranges, mismatched style lists, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid scene or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating, rendering or encoding frames.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::IndexOutOfRange`] value.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Build a [`SceneError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

/// Fail with [`SceneError::IndexOutOfRange`] unless `index < len`.
pub(crate) fn check_index(index: usize, len: usize) -> SceneResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(SceneError::out_of_range(index, len))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
