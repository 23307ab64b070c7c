//! Failures at the `wpctl` boundary

use thiserror::Error;

/// Why talking to the audio tools failed
///
/// An empty sink list is not a failure; see [`crate::selector::Listing::Empty`].
#[derive(Debug, Error)]
pub enum Failure {
    /// `wpctl status` could not be run or produced unusable output
    #[error("Failed to query audio status: {detail}")]
    Query { detail: String },

    /// `wpctl set-default` could not be run or exited with an error
    #[error("Failed to set default sink {id}: {detail}")]
    Apply { id: u32, detail: String },
}

impl Failure {
    /// Underlying diagnostic, usually the tool's stderr
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Query { detail } | Self::Apply { detail, .. } => detail,
        }
    }
}
