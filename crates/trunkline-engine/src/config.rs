//! Engine configuration.
//!
//! All knobs live in an explicit struct passed at engine construction;
//! there is no ambient global state. Digit-collection settings are the
//! global defaults and can be overridden per node in the flow
//! definition.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_initial_node() -> String {
    "main_menu".to_string()
}

fn default_digit_timeout_secs() -> u64 {
    5
}

fn default_digit_count() -> u8 {
    1
}

fn default_max_iterations() -> u32 {
    64
}

fn default_language() -> String {
    "en-US".to_string()
}

/// A daily hour window, inclusive start and exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    /// Returns true if `hour` falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

impl Default for HourWindow {
    fn default() -> Self {
        // 09:00-17:00 local.
        Self { start: 9, end: 17 }
    }
}

/// Configuration for the flow-execution core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Node a session starts at unless the caller-handling layer says
    /// otherwise.
    #[serde(default = "default_initial_node")]
    pub initial_node: String,

    /// Global digit-collection timeout, seconds.
    #[serde(default = "default_digit_timeout_secs")]
    pub digit_timeout_secs: u64,

    /// Global number of digits to collect per menu.
    #[serde(default = "default_digit_count")]
    pub digit_count: u8,

    /// Maximum traversal iterations before the session is forced to
    /// terminate with `LoopLimitExceeded`.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Business-hours window for time-based routing.
    #[serde(default)]
    pub business_hours: HourWindow,

    /// Language a session starts in.
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_node: default_initial_node(),
            digit_timeout_secs: default_digit_timeout_secs(),
            digit_count: default_digit_count(),
            max_iterations: default_max_iterations(),
            business_hours: HourWindow::default(),
            default_language: default_language(),
        }
    }
}

impl EngineConfig {
    /// The global digit-collection timeout as a `Duration`.
    pub fn digit_timeout(&self) -> Duration {
        Duration::from_secs(self.digit_timeout_secs)
    }
}
