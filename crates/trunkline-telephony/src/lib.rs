//! Telephony capability interfaces for the Trunkline IVR engine.
//!
//! The engine never talks to a telephony stack directly. It consumes
//! two narrow capability traits — [`TelephonyControl`] for call control
//! (audio playback, digit collection, bridging, recording) and
//! [`DirectoryLookup`] for best-effort queue/extension/user lookups —
//! and real backends are injected at engine construction.
//!
//! This crate also provides in-process simulated implementations
//! ([`ScriptedTelephony`], [`StaticDirectory`]) used by the test suite
//! and the demonstration binary. The scripted backend records every
//! command it receives, which is how the engine's determinism pledge is
//! asserted: a fixed flow and a fixed digit script must always produce
//! the identical command sequence.

pub mod control;
pub mod directory;
pub mod error;
pub mod sim;

pub use control::TelephonyControl;
pub use directory::DirectoryLookup;
pub use error::{LookupError, TelephonyError};
pub use sim::{ScriptedTelephony, StaticDirectory, TelephonyCommand};
