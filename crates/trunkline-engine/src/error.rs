//! Error taxonomy for the flow-execution core.
//!
//! Only session-fatal conditions surface here. Lookup failures and
//! unrecognized action variants are recovered in place by the
//! interpreter (logged, transition unchanged or degraded to a
//! main-menu restart) and never become an `EngineError`.

use trunkline_telephony::TelephonyError;

/// Session-fatal errors. Each of these terminates exactly one session;
/// concurrent sessions are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Traversal reached a node id the flow graph does not contain.
    /// The session plays an apology prompt and terminates.
    #[error("flow node `{node}` does not exist in the loaded flow")]
    FlowIntegrity { node: String },

    /// The telephony backend reported the call is gone. No further
    /// commands are attempted.
    #[error("call channel lost: {0}")]
    ChannelLost(String),

    /// The session ran more iterations than the configured maximum
    /// without reaching a terminal action. Guards against misconfigured
    /// flows with no terminal path.
    #[error("session exceeded the loop limit of {limit} iterations")]
    LoopLimitExceeded { limit: u32 },
}

impl From<TelephonyError> for EngineError {
    fn from(err: TelephonyError) -> Self {
        // Single-attempt command model: any telephony failure means the
        // session cannot continue driving this call.
        Self::ChannelLost(err.to_string())
    }
}
