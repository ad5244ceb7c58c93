use crate::reading::Syllable;

/// Errors that abort a labeling run.
///
/// Residual collisions among final labels are not errors; they are
/// reported by [`crate::validate::ValidationReport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("invalid input {token:?}: {reason}")]
    InvalidInput { token: String, reason: String },

    #[error("no reading known for {ch:?}")]
    DictionaryLookup { ch: char },

    #[error(
        "single characters {first:?} (#{first_index}) and {second:?} (#{second_index}) \
         share reading {reading}; a one-character word cannot be escalated"
    )]
    FatalCollision {
        reading: Syllable,
        first: String,
        first_index: usize,
        second: String,
        second_index: usize,
    },
}

impl LabelError {
    pub(crate) fn invalid(token: impl Into<String>, reason: impl Into<String>) -> Self {
        LabelError::InvalidInput {
            token: token.into(),
            reason: reason.into(),
        }
    }
}
