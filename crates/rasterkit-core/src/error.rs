//! Error types shared by the engine entry points.

use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Degenerate resize geometry is deliberately not represented here: the
/// resize engine falls back to an unmodified copy instead of failing.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The supplied options are inconsistent or incomplete. Raised before
    /// any buffer work starts.
    #[error("Invalid options for {operation}: {reason}")]
    InvalidOptions {
        operation: &'static str,
        reason: String,
    },

    /// Watermark removal was requested with a mask that marks no pixels.
    #[error("Watermark-removal mask contains no marked pixels")]
    EmptyMask,

    /// Encoding the output buffer failed.
    #[error(transparent)]
    Encode(#[from] crate::encode::EncodeError),
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidOptions`].
    pub fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            operation,
            reason: reason.into(),
        }
    }
}
