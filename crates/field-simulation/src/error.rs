use thiserror::Error;

/// Errors raised while loading or validating [`crate::FieldParams`]
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to parse field parameters: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize field parameters: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid field parameter `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ParamsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
