//! Error types for prompt rendering.

/// Errors that can occur while rendering a prompt to audio.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The synthesis backend failed or rejected the request.
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// The cloud synthesis endpoint could not be reached.
    #[error("synthesis endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The renderer is not configured for the requested operation.
    #[error("invalid renderer configuration: {0}")]
    Config(String),
}
