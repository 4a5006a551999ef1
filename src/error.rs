//! Error types for Burlómetro.

/// Remote classifier errors.
///
/// Every variant is recoverable: the analysis service falls back to the
/// heuristic classifier whenever the remote call fails for any reason.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Remote returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Invalid response: {reason}")]
    InvalidResponse { reason: String },
}
