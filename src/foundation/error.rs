/// Convenience result type used across cueframe.
pub type CueframeResult<T> = Result<T, CueframeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Content problems inside a parsed descriptor never surface here; those are
/// accumulated as [`crate::Issue`] values by the validator. This enum covers
/// the failures that stop an API call outright.
#[derive(thiserror::Error, Debug)]
pub enum CueframeError {
    /// Descriptor bytes that are not parseable JSON at all.
    #[error("structural error: {0}")]
    Structural(String),

    /// Invalid engine input outside the accumulated-issue path.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid beat schedule configuration.
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CueframeError {
    /// Build a [`CueframeError::Structural`] value.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural(msg.into())
    }

    /// Build a [`CueframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CueframeError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
