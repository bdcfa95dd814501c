use thiserror::Error;

/// Errors produced while turning an lsblk snapshot into a [`DeviceTree`].
///
/// [`DeviceTree`]: crate::types::DeviceTree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Malformed document: {reason}")]
    MalformedDocument { reason: String },

    #[error("Malformed value for `{key}`: {token:?} is not {expected}")]
    MalformedScalar {
        key: String,
        token: String,
        expected: &'static str,
    },
}

impl DecodeError {
    pub(crate) fn document(reason: impl Into<String>) -> Self {
        DecodeError::MalformedDocument {
            reason: reason.into(),
        }
    }

    pub(crate) fn scalar(key: &str, token: &str, expected: &'static str) -> Self {
        DecodeError::MalformedScalar {
            key: key.to_string(),
            token: token.to_string(),
            expected,
        }
    }

    /// External key of the field that failed, if the failure was field-level.
    pub fn key(&self) -> Option<&str> {
        match self {
            DecodeError::MalformedScalar { key, .. } => Some(key),
            DecodeError::MalformedDocument { .. } => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::document(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
