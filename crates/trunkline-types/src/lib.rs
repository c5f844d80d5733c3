//! Shared types for the Trunkline IVR platform.
//!
//! This crate provides the plain-data types used across all Trunkline
//! crates: live-call descriptors, directory records returned by the
//! lookup backends, audio handles produced by prompt rendering, and the
//! recording switch carried by flow actions.
//!
//! No crate in the workspace depends on anything *except*
//! `trunkline-types` for cross-cutting type definitions. This keeps the
//! dependency graph clean and prevents circular dependencies.

pub mod audio;
pub mod call;
pub mod directory;

pub use audio::AudioHandle;
pub use call::{CallInfo, CallStatus, RecordingSwitch};
pub use directory::{AgentStatus, ExtensionInfo, QueueAgent, QueueStatus, UserInfo};

/// Reserved transition token meaning "terminate the session".
pub const END_TOKEN: &str = "END";

/// Reserved transition token meaning "stay on the current node".
pub const CURRENT_TOKEN: &str = "CURRENT";

/// Returns true if `target` is one of the reserved transition tokens
/// rather than a flow node identifier.
pub fn is_reserved_target(target: &str) -> bool {
    target == END_TOKEN || target == CURRENT_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_targets_are_recognized() {
        assert!(is_reserved_target(END_TOKEN));
        assert!(is_reserved_target(CURRENT_TOKEN));
        assert!(!is_reserved_target("main_menu"));
        // Tokens are case-sensitive.
        assert!(!is_reserved_target("end"));
    }
}
