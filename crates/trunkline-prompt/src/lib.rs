//! Prompt rendering for the Trunkline IVR engine.
//!
//! The engine speaks to callers by rendering prompt text to a playable
//! [`AudioHandle`] and handing it to the telephony backend. Rendering
//! is behind the [`PromptRenderer`] capability trait with
//! interchangeable synthesis strategies:
//!
//! - [`HttpTts`] — cloud synthesis over HTTP
//! - [`EspeakTts`] — native synthesis via an `espeak-ng` subprocess
//! - [`StaticRenderer`] — a deterministic zero-I/O handle, for tests
//!   and platforms whose media server resolves `tts://` URIs itself
//!
//! The engine is agnostic to which strategy is injected.

pub mod cloud;
pub mod error;
pub mod fixed;
pub mod native;

pub use cloud::HttpTts;
pub use error::PromptError;
pub use fixed::StaticRenderer;
pub use native::EspeakTts;

use trunkline_types::AudioHandle;

/// Maximum prompt text size (8 KiB). Prevents resource exhaustion from
/// oversized synthesis requests.
pub const MAX_PROMPT_BYTES: usize = 8 * 1024;

/// Renders prompt text to playable audio.
#[async_trait::async_trait]
pub trait PromptRenderer: Send + Sync {
    /// Renders `text` in `language` (an IETF tag such as "en-US") to a
    /// handle the telephony backend can play.
    async fn render(&self, text: &str, language: &str) -> Result<AudioHandle, PromptError>;
}

/// Rejects prompt text over [`MAX_PROMPT_BYTES`].
pub(crate) fn check_prompt_size(text: &str) -> Result<(), PromptError> {
    if text.len() > MAX_PROMPT_BYTES {
        return Err(PromptError::Synthesis(format!(
            "prompt text exceeds maximum size: {} bytes (limit: {} bytes)",
            text.len(),
            MAX_PROMPT_BYTES
        )));
    }
    Ok(())
}
