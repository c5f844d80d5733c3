//! The engine: session registry and call entry point.
//!
//! One logical task per live call. The flow graph is read-only and
//! shared; each session's state is exclusively owned by its controller.
//! The registry's session table is the only cross-session shared
//! mutation, touched at session creation and termination.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{info, warn};
use trunkline_flow::FlowGraph;
use trunkline_prompt::PromptRenderer;
use trunkline_telephony::{DirectoryLookup, TelephonyControl};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::interpreter::ActionInterpreter;
use crate::menu::MenuExecutor;
use crate::session::{SessionController, SessionState};

/// How a session ended, for sessions that were not torn down by a
/// session-fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The traversal reached a terminal action.
    Completed,
    /// An external hangup cancelled the session mid-flight.
    HungUp,
}

/// The IVR engine: holds the shared flow, configuration, collaborator
/// handles, and the live-session table.
pub struct Engine {
    flow: Arc<FlowGraph>,
    config: Arc<EngineConfig>,
    telephony: Arc<dyn TelephonyControl>,
    directory: Arc<dyn DirectoryLookup>,
    renderer: Arc<dyn PromptRenderer>,
    clock: Arc<dyn Clock>,
    sessions: RwLock<HashMap<String, watch::Sender<bool>>>,
}

impl Engine {
    pub fn new(
        flow: FlowGraph,
        config: EngineConfig,
        telephony: Arc<dyn TelephonyControl>,
        directory: Arc<dyn DirectoryLookup>,
        renderer: Arc<dyn PromptRenderer>,
    ) -> Self {
        Self {
            flow: Arc::new(flow),
            config: Arc::new(config),
            telephony,
            directory,
            renderer,
            clock: Arc::new(SystemClock),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Replaces the wall clock. Tests pin the hour with this.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Handles one incoming call starting at the configured initial
    /// node. Resolves only once the session reaches termination.
    pub async fn handle_incoming_call(&self, call_id: &str) -> Result<CallOutcome, EngineError> {
        let initial = self.config.initial_node.clone();
        self.handle_incoming_call_at(call_id, &initial).await
    }

    /// Handles one incoming call starting at an explicit node.
    pub async fn handle_incoming_call_at(
        &self,
        call_id: &str,
        initial_node: &str,
    ) -> Result<CallOutcome, EngineError> {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        {
            let mut sessions = self.sessions.write().await;
            if sessions.insert(call_id.to_string(), cancel_tx).is_some() {
                warn!(call_id, "replacing existing session entry for call id");
            }
        }

        let mut controller = self.controller_for(call_id, initial_node);

        // The session loop is raced against the hangup signal: a
        // hangup interrupts at the current collaborator await and no
        // further commands are issued for this call.
        let result = tokio::select! {
            result = controller.run() => result,
            _ = cancel_rx.changed() => {
                info!(call_id, "session cancelled by hangup");
                Ok(CallOutcome::HungUp)
            }
        };

        self.sessions.write().await.remove(call_id);
        result
    }

    /// Signals the session owning `call_id` that the caller hung up.
    ///
    /// Returns true if a live session existed.
    pub async fn hangup(&self, call_id: &str) -> bool {
        match self.sessions.read().await.get(call_id) {
            Some(cancel) => cancel.send(true).is_ok(),
            None => false,
        }
    }

    /// Ids of the sessions currently live.
    pub async fn active_calls(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }

    fn controller_for(&self, call_id: &str, initial_node: &str) -> SessionController {
        let menu = MenuExecutor::new(
            self.telephony.clone(),
            self.renderer.clone(),
            self.config.clone(),
        );
        let interpreter = ActionInterpreter::new(
            self.telephony.clone(),
            self.directory.clone(),
            self.renderer.clone(),
            self.clock.clone(),
            self.config.clone(),
        );
        let state = SessionState::new(call_id, initial_node, &self.config.default_language);
        SessionController::new(
            self.flow.clone(),
            self.config.clone(),
            self.telephony.clone(),
            self.renderer.clone(),
            menu,
            interpreter,
            state,
        )
    }
}
