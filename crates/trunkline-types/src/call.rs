//! Live-call descriptors and recording control.

use serde::{Deserialize, Serialize};

/// Status of a call as reported by the telephony backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    /// The call is up and under engine control.
    Active,
    /// The call is ringing and has not yet been answered.
    Ringing,
    /// The call is held by the backend.
    Held,
    /// The caller has disconnected.
    Ended,
}

/// Information about a live call, as returned by the telephony backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallInfo {
    /// Backend identifier for the call leg.
    pub call_id: String,
    /// Current call status.
    pub status: CallStatus,
    /// Caller number presentation, if the backend knows it.
    pub caller_id: Option<String>,
}

/// Whether a recording trigger starts or stops call recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingSwitch {
    Start,
    Stop,
}

impl RecordingSwitch {
    /// Returns true when the switch enables recording.
    pub fn is_on(self) -> bool {
        matches!(self, Self::Start)
    }

    /// Returns the string label for this switch.
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}
