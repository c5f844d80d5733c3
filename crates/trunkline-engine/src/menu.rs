//! The menu executor.
//!
//! Runs one DTMF interaction: exactly one prompt playback and exactly
//! one digit collection per invocation. Retry and repeat policy belongs
//! entirely to the node's fallback action, which keeps this component
//! stateless per call.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use trunkline_flow::FlowNode;
use trunkline_prompt::PromptRenderer;
use trunkline_telephony::TelephonyControl;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::session::SessionState;
use crate::voice::speak;

/// The outcome of one menu interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The collected digits matched a configured option.
    Matched(String),
    /// No input before the timeout, or the digits matched nothing.
    Unmatched,
}

/// Executes single menu interactions.
pub struct MenuExecutor {
    telephony: Arc<dyn TelephonyControl>,
    renderer: Arc<dyn PromptRenderer>,
    config: Arc<EngineConfig>,
}

impl MenuExecutor {
    pub fn new(
        telephony: Arc<dyn TelephonyControl>,
        renderer: Arc<dyn PromptRenderer>,
        config: Arc<EngineConfig>,
    ) -> Self {
        Self {
            telephony,
            renderer,
            config,
        }
    }

    /// Plays the node's prompt and collects one round of digits.
    ///
    /// Per-node `timeout_secs`/`digits` settings override the engine
    /// defaults.
    pub async fn run_menu(
        &self,
        session: &SessionState,
        node: &FlowNode,
    ) -> Result<Selection, EngineError> {
        speak(&self.telephony, &self.renderer, session, &node.prompt).await?;

        let timeout = node
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.config.digit_timeout());
        let count = node.digits.unwrap_or(self.config.digit_count);

        let digits = self
            .telephony
            .collect_digits(&session.call_id, timeout, count)
            .await?;

        if digits.is_empty() {
            debug!(
                call_id = %session.call_id,
                node = %session.current_node,
                "no input before timeout"
            );
            return Ok(Selection::Unmatched);
        }

        if node.options.contains_key(&digits) {
            debug!(
                call_id = %session.call_id,
                node = %session.current_node,
                digits = %digits,
                "input matched option"
            );
            Ok(Selection::Matched(digits))
        } else {
            warn!(
                call_id = %session.call_id,
                node = %session.current_node,
                digits = %digits,
                "input matched no option, applying fallback"
            );
            Ok(Selection::Unmatched)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trunkline_flow::{ActionDescriptor, FlowNode};
    use trunkline_prompt::StaticRenderer;
    use trunkline_telephony::{ScriptedTelephony, TelephonyCommand};

    fn executor(telephony: Arc<ScriptedTelephony>) -> MenuExecutor {
        MenuExecutor::new(
            telephony,
            Arc::new(StaticRenderer::new()),
            Arc::new(EngineConfig::default()),
        )
    }

    fn sales_node() -> FlowNode {
        FlowNode::menu("Press 1 for sales.").with_option(
            "1",
            ActionDescriptor::RouteToQueue {
                target: "sales_queue".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn matching_digit_is_returned() {
        let telephony = Arc::new(ScriptedTelephony::with_digits(["1"]));
        let session = SessionState::new("c1", "main_menu", "en-US");
        let selection = executor(telephony)
            .run_menu(&session, &sales_node())
            .await
            .expect("menu should run");
        assert_eq!(selection, Selection::Matched("1".to_string()));
    }

    #[tokio::test]
    async fn unknown_digit_is_unmatched() {
        let telephony = Arc::new(ScriptedTelephony::with_digits(["7"]));
        let session = SessionState::new("c1", "main_menu", "en-US");
        let selection = executor(telephony)
            .run_menu(&session, &sales_node())
            .await
            .expect("menu should run");
        assert_eq!(selection, Selection::Unmatched);
    }

    #[tokio::test]
    async fn timeout_is_unmatched() {
        // Empty script: collection returns "" (no input).
        let telephony = Arc::new(ScriptedTelephony::new());
        let session = SessionState::new("c1", "main_menu", "en-US");
        let selection = executor(telephony)
            .run_menu(&session, &sales_node())
            .await
            .expect("menu should run");
        assert_eq!(selection, Selection::Unmatched);
    }

    #[tokio::test]
    async fn one_playback_one_collection_per_invocation() {
        let telephony = Arc::new(ScriptedTelephony::with_digits(["1"]));
        let session = SessionState::new("c1", "main_menu", "en-US");
        executor(telephony.clone())
            .run_menu(&session, &sales_node())
            .await
            .expect("menu should run");

        let log = telephony.commands().await;
        assert_eq!(log.len(), 2);
        assert!(matches!(log[0], TelephonyCommand::PlayAudio { .. }));
        assert!(matches!(log[1], TelephonyCommand::CollectDigits { .. }));
    }

    #[tokio::test]
    async fn per_node_overrides_reach_the_backend() {
        let telephony = Arc::new(ScriptedTelephony::with_digits(["12"]));
        let session = SessionState::new("c1", "main_menu", "en-US");
        let mut node = sales_node();
        node.timeout_secs = Some(10);
        node.digits = Some(2);
        executor(telephony.clone())
            .run_menu(&session, &node)
            .await
            .expect("menu should run");

        let log = telephony.commands().await;
        assert_eq!(
            log[1],
            TelephonyCommand::CollectDigits {
                call_id: "c1".to_string(),
                timeout: Duration::from_secs(10),
                count: 2,
            }
        );
    }
}
