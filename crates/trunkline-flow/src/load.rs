//! Flow loading with a built-in fallback.
//!
//! A broken or missing flow document must not take the whole engine
//! down: [`load_or_default`] degrades to the built-in minimal flow so
//! callers still reach a working menu while the configuration is fixed.

use std::path::Path;
use tracing::{error, info};

use crate::error::FlowError;
use crate::model::{ActionDescriptor, FlowGraph, FlowNode};

/// Loads and validates a flow document from disk.
pub fn load(path: impl AsRef<Path>) -> Result<FlowGraph, FlowError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let graph = FlowGraph::from_json(&contents)?;
    info!(
        path = %path.as_ref().display(),
        nodes = graph.len(),
        "loaded flow definition"
    );
    Ok(graph)
}

/// Loads a flow document, falling back to [`default_flow`] if the file
/// is absent, unreadable, or invalid.
pub fn load_or_default(path: impl AsRef<Path>) -> FlowGraph {
    match load(path.as_ref()) {
        Ok(graph) => graph,
        Err(FlowError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(
                path = %path.as_ref().display(),
                "flow file not found, using built-in default flow"
            );
            default_flow()
        }
        Err(e) => {
            error!(
                path = %path.as_ref().display(),
                error = %e,
                "failed to load flow definition, using built-in default flow"
            );
            default_flow()
        }
    }
}

/// The built-in minimal flow: one menu with two routed options and a
/// repeat option, fallback repeat.
pub fn default_flow() -> FlowGraph {
    let main_menu = FlowNode::menu(
        "Welcome to our service. Press 1 for sales, 2 for support, or 9 to repeat.",
    )
    .with_option(
        "1",
        ActionDescriptor::RouteToQueue {
            target: "sales_queue".to_string(),
        },
    )
    .with_option(
        "2",
        ActionDescriptor::RouteToQueue {
            target: "support_queue".to_string(),
        },
    )
    .with_option("9", ActionDescriptor::RepeatMenu)
    .with_fallback(ActionDescriptor::RepeatMenu);

    FlowGraph::from_nodes([("main_menu".to_string(), main_menu)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flow_validates() {
        default_flow().validate().expect("default flow must be valid");
    }

    #[test]
    fn default_flow_has_expected_options() {
        let flow = default_flow();
        let menu = flow.get("main_menu").expect("main_menu should exist");
        assert_eq!(menu.options.len(), 3);
        assert_eq!(
            menu.options.get("9"),
            Some(&ActionDescriptor::RepeatMenu)
        );
    }
}
