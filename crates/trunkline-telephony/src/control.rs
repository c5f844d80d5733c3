//! The call-control capability trait.

use std::time::Duration;

use trunkline_types::{AudioHandle, CallInfo};

use crate::error::TelephonyError;

/// Call control operations the engine issues against a live call.
///
/// Implementations wrap a real telephony stack. Every method is a
/// suspension point from the session's perspective: the session task
/// awaits the result and never proceeds speculatively.
#[async_trait::async_trait]
pub trait TelephonyControl: Send + Sync {
    /// Fetches current information about a call leg.
    async fn call_info(&self, call_id: &str) -> Result<CallInfo, TelephonyError>;

    /// Plays rendered audio to the call.
    async fn play_audio(&self, call_id: &str, audio: &AudioHandle) -> Result<(), TelephonyError>;

    /// Collects up to `count` DTMF digits, waiting at most `timeout`.
    ///
    /// An empty string signals that no input arrived before the
    /// timeout. This is a normal outcome, not an error.
    async fn collect_digits(
        &self,
        call_id: &str,
        timeout: Duration,
        count: u8,
    ) -> Result<String, TelephonyError>;

    /// Bridges the call to a destination (queue, extension, agent).
    async fn bridge(&self, call_id: &str, destination: &str) -> Result<(), TelephonyError>;

    /// Starts or stops call recording.
    async fn set_recording(&self, call_id: &str, enabled: bool) -> Result<(), TelephonyError>;
}
