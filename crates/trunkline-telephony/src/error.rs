//! Error types for the telephony and directory capabilities.

/// Errors reported by a telephony control backend.
#[derive(Debug, thiserror::Error)]
pub enum TelephonyError {
    /// The call is gone (hangup, network loss). Fatal for the owning
    /// session; no further commands may be attempted on this call.
    #[error("call channel lost: {0}")]
    ChannelLost(String),

    /// The backend rejected or failed a command for a call that is
    /// still up.
    #[error("telephony backend error: {0}")]
    Backend(String),
}

/// Errors reported by a directory lookup backend.
///
/// Lookups are best-effort enrichment: callers log these and proceed.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The requested record does not exist.
    #[error("directory record not found: {0}")]
    NotFound(String),

    /// The lookup backend itself failed.
    #[error("directory backend error: {0}")]
    Backend(String),
}
