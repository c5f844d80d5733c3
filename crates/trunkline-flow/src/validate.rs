//! Load-time validation of flow graphs.
//!
//! Validation runs once when a flow is loaded so that traversal never
//! has to re-check structural invariants. A validated graph guarantees
//! that every routing target resolves to an existing node or a reserved
//! token, that every node can recover from unmatched input, and that
//! time-routing nodes actually carry a routing decision.

use tracing::warn;
use trunkline_types::is_reserved_target;

use crate::error::FlowError;
use crate::model::{ActionDescriptor, FlowGraph, FlowNode, NodeKind};

/// Node id a `language_selection` action restarts at.
pub const MAIN_MENU: &str = "main_menu";

/// Default business-hours target when a time-routing action leaves it
/// unset.
pub const DEFAULT_BUSINESS_TARGET: &str = "main_menu";

/// Default after-hours target when a time-routing action leaves it
/// unset.
pub const DEFAULT_AFTER_HOURS_TARGET: &str = "voicemail_menu";

impl FlowGraph {
    /// Validates the graph. See the crate docs for the invariants.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.is_empty() {
            return Err(FlowError::Empty);
        }

        for (id, node) in self.iter() {
            self.validate_node(id, node)?;
        }

        Ok(())
    }

    fn validate_node(&self, id: &str, node: &FlowNode) -> Result<(), FlowError> {
        if node.fallback == ActionDescriptor::Unrecognized {
            return Err(FlowError::InvalidFallback {
                node: id.to_string(),
            });
        }

        if node.kind == NodeKind::TimeRouting
            && !matches!(node.action, Some(ActionDescriptor::TimeBasedRouting { .. }))
        {
            return Err(FlowError::MissingTimeAction {
                node: id.to_string(),
            });
        }

        let actions = node
            .options
            .values()
            .chain(std::iter::once(&node.fallback))
            .chain(node.action.iter());
        for action in actions {
            self.validate_action_targets(id, action)?;
        }

        // A menu node with no options whose fallback can only stay put
        // never reaches a terminal action without caller input. Input
        // can break the cycle, so this is a warning, not an error.
        if node.kind == NodeKind::Menu && node.options.is_empty() && stays_on_menu(&node.fallback) {
            warn!(node = id, "flow node is a trivial self-loop; only a digit-collection timeout guard bounds it");
        }

        Ok(())
    }

    /// Checks the node-id targets an action routes to. Queue and
    /// extension targets are backend identifiers, not flow nodes, and
    /// are not checked here.
    fn validate_action_targets(&self, node_id: &str, action: &ActionDescriptor) -> Result<(), FlowError> {
        match action {
            ActionDescriptor::TimeBasedRouting {
                business_hours_target,
                after_hours_target,
            } => {
                for target in [business_hours_target, after_hours_target]
                    .into_iter()
                    .flatten()
                {
                    self.require_target(node_id, target)?;
                }
                Ok(())
            }
            // Language selection restarts at the main menu; the graph
            // must actually have one.
            ActionDescriptor::LanguageSelection { .. } => self.require_target(node_id, MAIN_MENU),
            _ => Ok(()),
        }
    }

    fn require_target(&self, node_id: &str, target: &str) -> Result<(), FlowError> {
        if is_reserved_target(target) || self.contains(target) {
            Ok(())
        } else {
            Err(FlowError::DanglingTarget {
                node: node_id.to_string(),
                target: target.to_string(),
            })
        }
    }
}

/// Whether an action can only ever leave the session on the current
/// menu.
fn stays_on_menu(action: &ActionDescriptor) -> bool {
    matches!(
        action,
        ActionDescriptor::RepeatMenu
            | ActionDescriptor::PlayAnnouncement { .. }
            | ActionDescriptor::CallRecordingTrigger { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlowNode;

    fn graph_with(nodes: Vec<(&str, FlowNode)>) -> FlowGraph {
        FlowGraph::from_nodes(nodes.into_iter().map(|(id, n)| (id.to_string(), n)))
    }

    #[test]
    fn empty_graph_is_rejected() {
        let graph = graph_with(vec![]);
        assert!(matches!(graph.validate(), Err(FlowError::Empty)));
    }

    #[test]
    fn dangling_time_target_is_rejected() {
        let graph = graph_with(vec![(
            "router",
            FlowNode::time_routing(ActionDescriptor::TimeBasedRouting {
                business_hours_target: Some("missing".to_string()),
                after_hours_target: None,
            }),
        )]);
        match graph.validate() {
            Err(FlowError::DanglingTarget { node, target }) => {
                assert_eq!(node, "router");
                assert_eq!(target, "missing");
            }
            other => panic!("expected DanglingTarget, got {other:?}"),
        }
    }

    #[test]
    fn reserved_tokens_always_resolve() {
        let graph = graph_with(vec![(
            "router",
            FlowNode::time_routing(ActionDescriptor::TimeBasedRouting {
                business_hours_target: Some("END".to_string()),
                after_hours_target: Some("CURRENT".to_string()),
            }),
        )]);
        graph.validate().expect("reserved tokens are valid targets");
    }

    #[test]
    fn language_selection_requires_main_menu() {
        let graph = graph_with(vec![(
            "lang",
            FlowNode::menu("Press 1 for English.").with_option(
                "1",
                ActionDescriptor::LanguageSelection {
                    target: "en".to_string(),
                },
            ),
        )]);
        assert!(matches!(
            graph.validate(),
            Err(FlowError::DanglingTarget { target, .. }) if target == MAIN_MENU
        ));
    }

    #[test]
    fn unrecognized_fallback_is_rejected() {
        let graph = graph_with(vec![(
            "main_menu",
            FlowNode::menu("Hello.").with_fallback(ActionDescriptor::Unrecognized),
        )]);
        assert!(matches!(
            graph.validate(),
            Err(FlowError::InvalidFallback { node }) if node == "main_menu"
        ));
    }

    #[test]
    fn time_routing_node_without_action_is_rejected() {
        let mut node = FlowNode::menu("");
        node.kind = NodeKind::TimeRouting;
        let graph = graph_with(vec![("router", node)]);
        assert!(matches!(
            graph.validate(),
            Err(FlowError::MissingTimeAction { node }) if node == "router"
        ));
    }

    #[test]
    fn valid_menu_graph_passes() {
        let graph = graph_with(vec![(
            "main_menu",
            FlowNode::menu("Press 1 for sales.")
                .with_option(
                    "1",
                    ActionDescriptor::RouteToQueue {
                        target: "sales_queue".to_string(),
                    },
                )
                .with_option("9", ActionDescriptor::RepeatMenu),
        )]);
        graph.validate().expect("graph should validate");
    }
}
