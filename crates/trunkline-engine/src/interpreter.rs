//! The action interpreter.
//!
//! Maps one [`ActionDescriptor`] to a [`Transition`], touching only the
//! session variables it is allowed to (language, recording flag) and
//! effecting externally through the collaborator handles. Directory
//! lookups are best-effort enrichment: a failed lookup is logged and
//! the dependent bridge is still attempted.

use std::sync::Arc;

use tracing::{error, info, warn};
use trunkline_flow::{ActionDescriptor, DEFAULT_AFTER_HOURS_TARGET, DEFAULT_BUSINESS_TARGET, MAIN_MENU};
use trunkline_prompt::PromptRenderer;
use trunkline_telephony::{DirectoryLookup, TelephonyControl};
use trunkline_types::RecordingSwitch;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::session::SessionState;
use crate::voice::speak;

/// The result of interpreting one action, consumed only by the session
/// controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Move to the named node.
    GoTo(String),
    /// Stay on the current menu and run it again.
    Stay,
    /// The session is done (bridged away or hung up on purpose).
    Terminate,
}

/// Interprets action descriptors against a session.
pub struct ActionInterpreter {
    telephony: Arc<dyn TelephonyControl>,
    directory: Arc<dyn DirectoryLookup>,
    renderer: Arc<dyn PromptRenderer>,
    clock: Arc<dyn Clock>,
    config: Arc<EngineConfig>,
}

impl ActionInterpreter {
    pub fn new(
        telephony: Arc<dyn TelephonyControl>,
        directory: Arc<dyn DirectoryLookup>,
        renderer: Arc<dyn PromptRenderer>,
        clock: Arc<dyn Clock>,
        config: Arc<EngineConfig>,
    ) -> Self {
        Self {
            telephony,
            directory,
            renderer,
            clock,
            config,
        }
    }

    /// Applies one action and returns the transition to take.
    pub async fn apply(
        &self,
        session: &mut SessionState,
        action: &ActionDescriptor,
    ) -> Result<Transition, EngineError> {
        info!(
            call_id = %session.call_id,
            node = %session.current_node,
            action = action.label(),
            "applying action"
        );

        match action {
            ActionDescriptor::RouteToQueue { target } => {
                match self.directory.queue_agents(target).await {
                    Ok(status) => info!(
                        call_id = %session.call_id,
                        queue = %target,
                        available = status.available_agents(),
                        "queue lookup"
                    ),
                    Err(e) => warn!(
                        call_id = %session.call_id,
                        queue = %target,
                        error = %e,
                        "queue lookup failed, attempting bridge anyway"
                    ),
                }
                self.say(session, &format!("Connecting you to {target}."))
                    .await?;
                self.telephony.bridge(&session.call_id, target).await?;
                Ok(Transition::Terminate)
            }

            ActionDescriptor::TransferToExtension { target } => {
                match self.directory.extension_details(target).await {
                    Ok(info) => info!(
                        call_id = %session.call_id,
                        extension = %target,
                        kind = %info.kind,
                        "extension lookup"
                    ),
                    Err(e) => warn!(
                        call_id = %session.call_id,
                        extension = %target,
                        error = %e,
                        "extension lookup failed, attempting bridge anyway"
                    ),
                }
                self.say(session, &format!("Transferring you to extension {target}."))
                    .await?;
                self.telephony.bridge(&session.call_id, target).await?;
                Ok(Transition::Terminate)
            }

            ActionDescriptor::LanguageSelection { target } => {
                info!(call_id = %session.call_id, language = %target, "language selected");
                session.language = target.clone();
                Ok(Transition::GoTo(MAIN_MENU.to_string()))
            }

            ActionDescriptor::CallRecordingTrigger { target } => {
                let enabled = target.is_on();
                self.telephony
                    .set_recording(&session.call_id, enabled)
                    .await?;
                session.recording = enabled;
                let confirmation = match target {
                    RecordingSwitch::Start => "Call recording has started.",
                    RecordingSwitch::Stop => "Call recording has stopped.",
                };
                self.say(session, confirmation).await?;
                Ok(Transition::Stay)
            }

            ActionDescriptor::RepeatMenu => Ok(Transition::Stay),

            ActionDescriptor::PlayAnnouncement { target } => {
                self.say(session, target).await?;
                Ok(Transition::Stay)
            }

            ActionDescriptor::TimeBasedRouting {
                business_hours_target,
                after_hours_target,
            } => {
                let hour = self.clock.local_hour();
                let target = if self.config.business_hours.contains(hour) {
                    business_hours_target
                        .as_deref()
                        .unwrap_or(DEFAULT_BUSINESS_TARGET)
                } else {
                    after_hours_target
                        .as_deref()
                        .unwrap_or(DEFAULT_AFTER_HOURS_TARGET)
                };
                info!(
                    call_id = %session.call_id,
                    hour,
                    target = %target,
                    "time-based routing"
                );
                Ok(Transition::GoTo(target.to_string()))
            }

            ActionDescriptor::Exit => {
                self.say(session, "Thank you for calling. Goodbye.").await?;
                Ok(Transition::Terminate)
            }

            ActionDescriptor::Unrecognized => {
                // A flow-definition defect, not a reason to drop the
                // caller: restart at the main menu.
                error!(
                    call_id = %session.call_id,
                    node = %session.current_node,
                    "unrecognized action in flow definition, restarting at main menu"
                );
                Ok(Transition::GoTo(MAIN_MENU.to_string()))
            }
        }
    }

    async fn say(&self, session: &SessionState, text: &str) -> Result<(), EngineError> {
        speak(&self.telephony, &self.renderer, session, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use trunkline_prompt::StaticRenderer;
    use trunkline_telephony::{ScriptedTelephony, StaticDirectory, TelephonyCommand};

    fn interpreter_at(hour: u32, telephony: Arc<ScriptedTelephony>) -> ActionInterpreter {
        ActionInterpreter::new(
            telephony,
            Arc::new(StaticDirectory::new()),
            Arc::new(StaticRenderer::new()),
            Arc::new(FixedClock(hour)),
            Arc::new(EngineConfig::default()),
        )
    }

    fn test_session() -> SessionState {
        SessionState::new("call-1", "main_menu", "en-US")
    }

    async fn route_at(hour: u32) -> Transition {
        let interpreter = interpreter_at(hour, Arc::new(ScriptedTelephony::new()));
        let mut session = test_session();
        interpreter
            .apply(
                &mut session,
                &ActionDescriptor::TimeBasedRouting {
                    business_hours_target: Some("day_menu".to_string()),
                    after_hours_target: Some("night_menu".to_string()),
                },
            )
            .await
            .expect("time routing should succeed")
    }

    #[tokio::test]
    async fn time_routing_hour_10_is_business() {
        assert_eq!(route_at(10).await, Transition::GoTo("day_menu".to_string()));
    }

    #[tokio::test]
    async fn time_routing_hour_20_is_after_hours() {
        assert_eq!(route_at(20).await, Transition::GoTo("night_menu".to_string()));
    }

    #[tokio::test]
    async fn time_routing_hour_9_boundary_is_business() {
        assert_eq!(route_at(9).await, Transition::GoTo("day_menu".to_string()));
    }

    #[tokio::test]
    async fn time_routing_hour_17_boundary_is_after_hours() {
        assert_eq!(route_at(17).await, Transition::GoTo("night_menu".to_string()));
    }

    #[tokio::test]
    async fn time_routing_defaults_when_targets_unset() {
        let interpreter = interpreter_at(10, Arc::new(ScriptedTelephony::new()));
        let mut session = test_session();
        let transition = interpreter
            .apply(
                &mut session,
                &ActionDescriptor::TimeBasedRouting {
                    business_hours_target: None,
                    after_hours_target: None,
                },
            )
            .await
            .expect("should succeed");
        assert_eq!(transition, Transition::GoTo("main_menu".to_string()));
    }

    #[tokio::test]
    async fn route_to_queue_bridges_despite_failed_lookup() {
        // StaticDirectory is empty: the lookup fails, the bridge still
        // happens.
        let telephony = Arc::new(ScriptedTelephony::new());
        let interpreter = interpreter_at(10, telephony.clone());
        let mut session = test_session();

        let transition = interpreter
            .apply(
                &mut session,
                &ActionDescriptor::RouteToQueue {
                    target: "sales_queue".to_string(),
                },
            )
            .await
            .expect("routing should succeed");

        assert_eq!(transition, Transition::Terminate);
        let log = telephony.commands().await;
        assert!(log.iter().any(|c| matches!(
            c,
            TelephonyCommand::Bridge { destination, .. } if destination == "sales_queue"
        )));
    }

    #[tokio::test]
    async fn language_selection_mutates_session_and_restarts() {
        let interpreter = interpreter_at(10, Arc::new(ScriptedTelephony::new()));
        let mut session = test_session();
        let transition = interpreter
            .apply(
                &mut session,
                &ActionDescriptor::LanguageSelection {
                    target: "fr-FR".to_string(),
                },
            )
            .await
            .expect("should succeed");
        assert_eq!(session.language, "fr-FR");
        assert_eq!(transition, Transition::GoTo("main_menu".to_string()));
    }

    #[tokio::test]
    async fn recording_trigger_flips_flag_and_stays() {
        let telephony = Arc::new(ScriptedTelephony::new());
        let interpreter = interpreter_at(10, telephony.clone());
        let mut session = test_session();

        let transition = interpreter
            .apply(
                &mut session,
                &ActionDescriptor::CallRecordingTrigger {
                    target: RecordingSwitch::Start,
                },
            )
            .await
            .expect("should succeed");

        assert!(session.recording);
        assert_eq!(transition, Transition::Stay);
        let log = telephony.commands().await;
        assert_eq!(
            log[0],
            TelephonyCommand::SetRecording {
                call_id: "call-1".to_string(),
                enabled: true,
            }
        );
    }

    #[tokio::test]
    async fn unrecognized_action_degrades_to_main_menu() {
        let interpreter = interpreter_at(10, Arc::new(ScriptedTelephony::new()));
        let mut session = test_session();
        let transition = interpreter
            .apply(&mut session, &ActionDescriptor::Unrecognized)
            .await
            .expect("degrade, not fail");
        assert_eq!(transition, Transition::GoTo("main_menu".to_string()));
    }
}
