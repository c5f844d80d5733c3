//! Cloud synthesis over HTTP.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;
use trunkline_types::AudioHandle;

use crate::error::PromptError;
use crate::{check_prompt_size, PromptRenderer};

/// Request timeout for the synthesis endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// Renders prompts by POSTing to a cloud speech-synthesis endpoint.
///
/// The endpoint receives `{"text": ..., "language": ...}` and replies
/// with raw audio bytes (PCM s16le).
#[derive(Debug, Clone)]
pub struct HttpTts {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTts {
    /// Creates a renderer against the given synthesis endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, PromptError> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(PromptError::Config(
                "synthesis endpoint URL is empty".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait::async_trait]
impl PromptRenderer for HttpTts {
    async fn render(&self, text: &str, language: &str) -> Result<AudioHandle, PromptError> {
        check_prompt_size(text)?;

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SynthesisRequest { text, language })
            .send()
            .await?
            .error_for_status()
            .map_err(|e| PromptError::Synthesis(format!("synthesis endpoint rejected request: {e}")))?;

        let audio = response.bytes().await?;
        debug!(bytes = audio.len(), language, "rendered prompt via cloud synthesis");
        Ok(AudioHandle::Pcm(audio.to_vec()))
    }
}
