//! The flow graph data model.
//!
//! The wire format is the JSON document shape used by flow authors:
//! a top-level object mapping node ids to nodes, and actions tagged by
//! an `"action"` key, e.g.
//!
//! ```json
//! {
//!   "main_menu": {
//!     "prompt": "Press 1 for sales, 2 for support, or 9 to repeat.",
//!     "options": {
//!       "1": { "action": "route_to_queue", "target": "sales_queue" },
//!       "2": { "action": "route_to_queue", "target": "support_queue" },
//!       "9": { "action": "repeat_menu" }
//!     },
//!     "fallback": { "action": "repeat_menu" }
//!   }
//! }
//! ```

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use trunkline_types::RecordingSwitch;

/// How the session controller interprets a node before attempting DTMF
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A DTMF menu: play the prompt, collect a digit, match options.
    #[default]
    Menu,
    /// A routing decision node: no menu interaction, the embedded
    /// action is applied directly.
    TimeRouting,
}

/// A single action a flow can dispatch.
///
/// Internally tagged on the `"action"` key. Unknown tags deserialize to
/// [`ActionDescriptor::Unrecognized`] so one bad entry in a document
/// degrades at runtime (restart at the main menu) rather than failing
/// the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionDescriptor {
    /// Bridge the call into a queue.
    RouteToQueue { target: String },
    /// Bridge the call to an extension.
    TransferToExtension { target: String },
    /// Set the session language, then restart at the main menu.
    LanguageSelection { target: String },
    /// Start or stop call recording, then stay on the current menu.
    CallRecordingTrigger { target: RecordingSwitch },
    /// Replay the current menu.
    RepeatMenu,
    /// Play the target text as an announcement, then stay.
    PlayAnnouncement { target: String },
    /// Route by wall-clock hour against the business-hours window.
    TimeBasedRouting {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        business_hours_target: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        after_hours_target: Option<String>,
    },
    /// Play the goodbye prompt and terminate the session.
    Exit,
    /// An action tag this engine does not know. Kept as data so the
    /// interpreter can log it as a configuration defect and degrade.
    #[serde(other)]
    Unrecognized,
}

impl ActionDescriptor {
    /// Returns the tag label for log output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RouteToQueue { .. } => "route_to_queue",
            Self::TransferToExtension { .. } => "transfer_to_extension",
            Self::LanguageSelection { .. } => "language_selection",
            Self::CallRecordingTrigger { .. } => "call_recording_trigger",
            Self::RepeatMenu => "repeat_menu",
            Self::PlayAnnouncement { .. } => "play_announcement",
            Self::TimeBasedRouting { .. } => "time_based_routing",
            Self::Exit => "exit",
            Self::Unrecognized => "unrecognized",
        }
    }
}

fn default_fallback() -> ActionDescriptor {
    ActionDescriptor::RepeatMenu
}

/// A single node in the flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Prompt text rendered and played when the node is entered.
    #[serde(default)]
    pub prompt: String,

    /// Node kind tag; plain DTMF menu unless stated otherwise.
    #[serde(default, rename = "type")]
    pub kind: NodeKind,

    /// Digit-string to action mapping.
    #[serde(default)]
    pub options: BTreeMap<String, ActionDescriptor>,

    /// Action applied when input matches no option or times out.
    /// Defaults to repeating the menu.
    #[serde(default = "default_fallback")]
    pub fallback: ActionDescriptor,

    /// Embedded action for non-menu nodes (`time_routing`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDescriptor>,

    /// Per-node override of the digit-collection timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Per-node override of the number of digits to collect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digits: Option<u8>,
}

impl FlowNode {
    /// A plain menu node with the given prompt.
    pub fn menu(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: NodeKind::Menu,
            options: BTreeMap::new(),
            fallback: default_fallback(),
            action: None,
            timeout_secs: None,
            digits: None,
        }
    }

    /// A time-routing node wrapping the given action.
    pub fn time_routing(action: ActionDescriptor) -> Self {
        Self {
            prompt: String::new(),
            kind: NodeKind::TimeRouting,
            options: BTreeMap::new(),
            fallback: default_fallback(),
            action: Some(action),
            timeout_secs: None,
            digits: None,
        }
    }

    /// Adds an option mapping a digit string to an action.
    pub fn with_option(mut self, digit: impl Into<String>, action: ActionDescriptor) -> Self {
        self.options.insert(digit.into(), action);
        self
    }

    /// Replaces the fallback action.
    pub fn with_fallback(mut self, action: ActionDescriptor) -> Self {
        self.fallback = action;
        self
    }
}

/// An immutable, validated graph of flow nodes, keyed by node id.
///
/// Shared read-only across all concurrent sessions after load; no
/// locking is needed at traversal time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlowGraph {
    nodes: BTreeMap<String, FlowNode>,
}

impl FlowGraph {
    /// Builds a graph from node entries. Callers constructing graphs in
    /// code (the default flow, tests) go through validation separately.
    pub fn from_nodes(nodes: impl IntoIterator<Item = (String, FlowNode)>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Parses a JSON flow document and validates it.
    pub fn from_json(document: &str) -> Result<Self, crate::FlowError> {
        let graph: Self = serde_json::from_str(document)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Looks up a node by id.
    pub fn get(&self, node_id: &str) -> Option<&FlowNode> {
        self.nodes.get(node_id)
    }

    /// Returns true if the graph contains the node id.
    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates node entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlowNode)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }
}

// Deserialization goes through a map visitor rather than the derived
// impl: serde's default map handling keeps the last entry for a
// duplicated key, which would silently mask an authoring mistake.
// Duplicate node ids are a parse error here.
impl<'de> Deserialize<'de> for FlowGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GraphVisitor;

        impl<'de> Visitor<'de> for GraphVisitor {
            type Value = FlowGraph;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of node ids to flow nodes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut nodes = BTreeMap::new();
                while let Some((id, node)) = access.next_entry::<String, FlowNode>()? {
                    if nodes.insert(id.clone(), node).is_some() {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate flow node id `{id}`"
                        )));
                    }
                }
                Ok(FlowGraph { nodes })
            }
        }

        deserializer.deserialize_map(GraphVisitor)
    }
}
