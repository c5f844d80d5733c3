//! Flow definitions for the Trunkline IVR engine.
//!
//! A flow is an immutable graph of menu nodes loaded once per engine
//! lifetime. Each node carries a prompt, a digit-to-action options map,
//! and a fallback action taken on unmatched or missing input. Actions
//! are a closed enum over the eight supported kinds plus an explicit
//! `Unrecognized` arm, so a typo in a flow document degrades one menu
//! selection instead of failing the whole graph.
//!
//! # Loading
//!
//! Flows are read from a JSON document whose top level maps node ids to
//! node definitions. [`load_or_default`] never fails: an absent,
//! unreadable, or invalid document falls back to the built-in minimal
//! flow so callers keep service during misconfiguration.
//!
//! # Validation
//!
//! [`FlowGraph::validate`] runs at load time, not at traversal time.
//! Every routing target referenced anywhere in the graph must resolve
//! to an existing node id or one of the reserved `END`/`CURRENT`
//! tokens. Trivial self-loops that only caller input can break are
//! logged as warnings, not rejected.

pub mod error;
pub mod load;
pub mod model;
pub mod validate;

pub use error::FlowError;
pub use load::{default_flow, load, load_or_default};
pub use model::{ActionDescriptor, FlowGraph, FlowNode, NodeKind};
pub use validate::{DEFAULT_AFTER_HOURS_TARGET, DEFAULT_BUSINESS_TARGET, MAIN_MENU};
