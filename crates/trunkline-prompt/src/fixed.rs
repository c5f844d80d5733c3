//! Deterministic zero-I/O rendering.

use trunkline_types::AudioHandle;

use crate::error::PromptError;
use crate::{check_prompt_size, PromptRenderer};

/// Renders prompts as `tts://<language>/<text>` URIs.
///
/// No synthesis happens here: the handle carries the text itself, for
/// backends whose media server performs synthesis at playback time and
/// for deterministic tests, where the URI makes command-log assertions
/// readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRenderer;

impl StaticRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PromptRenderer for StaticRenderer {
    async fn render(&self, text: &str, language: &str) -> Result<AudioHandle, PromptError> {
        check_prompt_size(text)?;
        Ok(AudioHandle::Uri(format!("tts://{language}/{text}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_a_stable_uri() {
        let renderer = StaticRenderer::new();
        let handle = renderer
            .render("Thank you for calling.", "en-US")
            .await
            .expect("render should succeed");
        assert_eq!(
            handle,
            AudioHandle::Uri("tts://en-US/Thank you for calling.".to_string())
        );
    }

    #[tokio::test]
    async fn oversized_prompt_is_rejected() {
        let renderer = StaticRenderer::new();
        let huge = "a".repeat(crate::MAX_PROMPT_BYTES + 1);
        let err = renderer
            .render(&huge, "en-US")
            .await
            .expect_err("oversized prompt must fail");
        assert!(matches!(err, PromptError::Synthesis(_)));
    }
}
