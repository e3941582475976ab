/// Convenience result type used across inkboard.
pub type InkResult<T> = Result<T, InkError>;

/// Top-level error taxonomy used by the drawing surface APIs.
///
/// Nothing on the stroke path returns these: input and presentation failures degrade to a
/// still-usable drawing mode. Errors surface only from sizing, configuration and trace loading.
#[derive(thiserror::Error, Debug)]
pub enum InkError {
    /// Invalid caller-provided data (surface sizes, stroke widths, colors).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing options and traces.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InkError {
    /// Build an [`InkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`InkError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`InkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
