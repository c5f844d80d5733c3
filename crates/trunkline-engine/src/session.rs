//! The session controller: one call's traversal loop.
//!
//! A session is an explicit state machine with two states,
//! `Active(node)` and `Terminated`, and a bounded iteration count so a
//! misconfigured flow with no terminal path is a detectable error
//! rather than an unbounded loop.

use std::sync::Arc;

use tracing::{error, info};
use trunkline_flow::{ActionDescriptor, FlowGraph, NodeKind};
use trunkline_prompt::PromptRenderer;
use trunkline_telephony::TelephonyControl;
use trunkline_types::{CURRENT_TOKEN, END_TOKEN};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::interpreter::{ActionInterpreter, Transition};
use crate::menu::{MenuExecutor, Selection};
use crate::registry::CallOutcome;
use crate::voice::speak;

const APOLOGY_PROMPT: &str = "We apologize, an error occurred. Goodbye.";

/// Mutable per-call state. Owned exclusively by its session controller;
/// no other component mutates it.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Backend identifier of the call this session drives.
    pub call_id: String,
    /// Node the traversal is currently at.
    pub current_node: String,
    /// Selected prompt language.
    pub language: String,
    /// Whether call recording is currently on.
    pub recording: bool,
    /// Traversal iterations so far.
    pub iterations: u32,
}

impl SessionState {
    pub fn new(
        call_id: impl Into<String>,
        initial_node: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            current_node: initial_node.into(),
            language: language.into(),
            recording: false,
            iterations: 0,
        }
    }
}

/// Drives one call from its initial node to termination.
pub struct SessionController {
    flow: Arc<FlowGraph>,
    config: Arc<EngineConfig>,
    telephony: Arc<dyn TelephonyControl>,
    renderer: Arc<dyn PromptRenderer>,
    menu: MenuExecutor,
    interpreter: ActionInterpreter,
    state: SessionState,
}

impl SessionController {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        flow: Arc<FlowGraph>,
        config: Arc<EngineConfig>,
        telephony: Arc<dyn TelephonyControl>,
        renderer: Arc<dyn PromptRenderer>,
        menu: MenuExecutor,
        interpreter: ActionInterpreter,
        state: SessionState,
    ) -> Self {
        Self {
            flow,
            config,
            telephony,
            renderer,
            menu,
            interpreter,
            state,
        }
    }

    /// A read-only view of the session state, for inspection in tests.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs the traversal loop until the session terminates.
    ///
    /// Returns `Ok(CallOutcome::Completed)` on a normal terminal
    /// action; session-fatal conditions come back as `Err` after the
    /// session has wound down (apology played where the channel still
    /// allows it).
    pub async fn run(&mut self) -> Result<CallOutcome, EngineError> {
        info!(
            call_id = %self.state.call_id,
            node = %self.state.current_node,
            "session started"
        );

        loop {
            self.state.iterations += 1;
            if self.state.iterations > self.config.max_iterations {
                error!(
                    call_id = %self.state.call_id,
                    node = %self.state.current_node,
                    limit = self.config.max_iterations,
                    "loop limit exceeded, terminating session"
                );
                return Err(EngineError::LoopLimitExceeded {
                    limit: self.config.max_iterations,
                });
            }

            let node = match self.flow.get(&self.state.current_node) {
                Some(node) => node.clone(),
                None => {
                    error!(
                        call_id = %self.state.call_id,
                        node = %self.state.current_node,
                        "flow node missing at runtime"
                    );
                    // Best-effort apology; the integrity error is what
                    // we report either way.
                    let _ = speak(&self.telephony, &self.renderer, &self.state, APOLOGY_PROMPT)
                        .await;
                    return Err(EngineError::FlowIntegrity {
                        node: self.state.current_node.clone(),
                    });
                }
            };

            let transition = if node.kind == NodeKind::TimeRouting {
                // Validation guarantees an embedded action; degrade to
                // the unrecognized path if a hand-built graph lacks one.
                let action = node.action.clone().unwrap_or(ActionDescriptor::Unrecognized);
                self.interpreter.apply(&mut self.state, &action).await?
            } else {
                match self.menu.run_menu(&self.state, &node).await? {
                    Selection::Matched(key) => {
                        let action = node
                            .options
                            .get(&key)
                            .cloned()
                            .unwrap_or(ActionDescriptor::Unrecognized);
                        self.interpreter.apply(&mut self.state, &action).await?
                    }
                    Selection::Unmatched => {
                        self.interpreter.apply(&mut self.state, &node.fallback).await?
                    }
                }
            };

            match transition {
                Transition::Terminate => {
                    info!(call_id = %self.state.call_id, "session terminated");
                    return Ok(CallOutcome::Completed);
                }
                Transition::Stay => {}
                Transition::GoTo(target) => {
                    if target == END_TOKEN {
                        info!(call_id = %self.state.call_id, "session reached END");
                        return Ok(CallOutcome::Completed);
                    }
                    if target != CURRENT_TOKEN {
                        self.state.current_node = target;
                    }
                }
            }
        }
    }
}
