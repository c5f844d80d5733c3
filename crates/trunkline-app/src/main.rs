//! Trunkline demonstration binary.
//!
//! Loads configuration and a flow definition, builds the engine over
//! the in-process simulated telephony backend, and drives one scripted
//! call through the flow. The real caller-handling layer calls the same
//! [`trunkline_engine::Engine::handle_incoming_call`] entry point with
//! a production telephony backend injected instead.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use trunkline_engine::Engine;
use trunkline_prompt::{EspeakTts, HttpTts, PromptRenderer, StaticRenderer};
use trunkline_telephony::{ScriptedTelephony, StaticDirectory};
use trunkline_types::{AgentStatus, ExtensionInfo, QueueAgent, QueueStatus};

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("TRUNKLINE_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn build_renderer(tts: &config::TtsConfig) -> Arc<dyn PromptRenderer> {
    match tts.backend {
        config::TtsBackend::Static => Arc::new(StaticRenderer::new()),
        config::TtsBackend::Espeak => Arc::new(EspeakTts::new()),
        config::TtsBackend::Http => match HttpTts::new(tts.endpoint.clone()) {
            Ok(renderer) => Arc::new(renderer),
            Err(e) => {
                tracing::error!(error = %e, "cloud synthesis misconfigured, using static renderer");
                Arc::new(StaticRenderer::new())
            }
        },
    }
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration — the engine cannot start without valid config");

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    let flow = trunkline_flow::load_or_default(&config.flow.path);
    tracing::info!(nodes = flow.len(), "flow definition ready");

    // A scripted backend stands in for the telephony stack: the demo
    // caller presses "9" (repeat) and then "1" (route to sales).
    let telephony = Arc::new(ScriptedTelephony::with_digits(["9", "1"]));
    let directory = Arc::new(
        StaticDirectory::new()
            .with_queue(QueueStatus {
                queue_id: "sales_queue".to_string(),
                agents: vec![QueueAgent {
                    id: "agent1".to_string(),
                    status: AgentStatus::Available,
                }],
            })
            .with_extension(ExtensionInfo {
                extension: "1001".to_string(),
                kind: "internal".to_string(),
                device: Some("SIP/1001".to_string()),
            }),
    );
    let renderer = build_renderer(&config.tts);

    let engine = Engine::new(
        flow,
        config.engine.clone(),
        telephony.clone(),
        directory,
        renderer,
    );

    let call_id = format!("call-{}", uuid::Uuid::new_v4());
    tracing::info!(call_id = %call_id, "simulating incoming call");

    match engine.handle_incoming_call(&call_id).await {
        Ok(outcome) => tracing::info!(call_id = %call_id, ?outcome, "call finished"),
        Err(e) => tracing::error!(call_id = %call_id, error = %e, "call failed"),
    }

    for command in telephony.commands().await {
        tracing::info!(?command, "issued");
    }
}
