use thiserror::Error;

/// Errors raised by the handicap engine.
///
/// Too few rounds is not an error; see [`crate::handicap::handicap_index`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandicapError {
    #[error("Invalid input: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },
}

impl HandicapError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        HandicapError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
