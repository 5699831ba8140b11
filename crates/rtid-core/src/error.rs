//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A value rejected by the construction path.
    #[error("ARG/{value}: {rule}")]
    InvalidArgument { value: String, rule: &'static str },

    /// Malformed textual input handed to a parser.
    #[error("FORMAT/{input}: {reason}")]
    Format { input: String, reason: String },
}

impl RuntimeError {
    pub(crate) fn invalid(value: impl ToString, rule: &'static str) -> Self {
        Self::InvalidArgument {
            value: value.to_string(),
            rule,
        }
    }

    pub(crate) fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
