//! Error types for flow loading and validation.

/// Errors that can occur while loading or validating a flow definition.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The flow document could not be read from disk.
    #[error("failed to read flow file: {0}")]
    Io(#[from] std::io::Error),

    /// The flow document is not valid JSON, or contains duplicate node
    /// ids (rejected by the duplicate-aware deserializer).
    #[error("failed to parse flow document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The flow document parsed but contains no nodes.
    #[error("flow document contains no nodes")]
    Empty,

    /// A routing target references a node id that does not exist and is
    /// not a reserved token.
    #[error("node `{node}` routes to `{target}`, which does not exist in the flow")]
    DanglingTarget { node: String, target: String },

    /// A node's fallback is not a usable action. Every node must be able
    /// to recover from unmatched input.
    #[error("node `{node}` has a fallback with no usable action")]
    InvalidFallback { node: String },

    /// A `time_routing` node has no embedded time-based-routing action
    /// to evaluate.
    #[error("time-routing node `{node}` has no embedded time_based_routing action")]
    MissingTimeAction { node: String },
}
