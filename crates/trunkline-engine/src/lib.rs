//! The Trunkline flow-execution core.
//!
//! Drives a telephone call through a declarative menu graph: plays
//! prompts, collects touch-tone input, and dispatches terminal actions
//! (queue transfer, extension transfer, recording control, time-based
//! branching) through the capability interfaces in
//! `trunkline-telephony` and `trunkline-prompt`.
//!
//! # Components
//!
//! - [`ActionInterpreter`] — pure decision logic mapping one action
//!   descriptor to a [`Transition`], invoking external effects through
//!   the collaborator handles
//! - [`MenuExecutor`] — one DTMF interaction per invocation: one prompt
//!   playback, one digit collection, option matching
//! - [`SessionController`] — one call's traversal loop, from
//!   `Active(initial_node)` to `Terminated`
//! - [`Engine`] — the session registry: one task per live call,
//!   isolated state, hangup cancellation
//!
//! # Determinism
//!
//! Within a session every step awaits the previous step's external
//! result before proceeding, so for a fixed flow and a fixed digit
//! script the sequence of telephony commands is exactly reproducible.
//! The simulated backend's command log is how the tests assert this.

pub mod clock;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod menu;
pub mod registry;
pub mod session;
mod voice;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, HourWindow};
pub use error::EngineError;
pub use interpreter::{ActionInterpreter, Transition};
pub use menu::{MenuExecutor, Selection};
pub use registry::{CallOutcome, Engine};
pub use session::{SessionController, SessionState};
