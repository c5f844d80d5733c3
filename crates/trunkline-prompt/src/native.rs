//! Native synthesis via `espeak-ng`.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use trunkline_types::AudioHandle;

use crate::error::PromptError;
use crate::{check_prompt_size, PromptRenderer};

/// Timeout for the synthesis subprocess.
const SYNTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Size of the WAV header `espeak-ng --stdout` prefixes to its output.
const WAV_HEADER_BYTES: usize = 44;

/// Renders prompts through an `espeak-ng` subprocess.
///
/// `espeak-ng` writes WAV to stdout via `--stdout`; the 44-byte WAV
/// header is stripped to return raw PCM data. The language tag is
/// passed as the `-v` voice argument.
#[derive(Debug, Clone)]
pub struct EspeakTts {
    binary: PathBuf,
}

impl Default for EspeakTts {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("espeak-ng"),
        }
    }
}

impl EspeakTts {
    /// Uses `espeak-ng` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an explicit binary path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait::async_trait]
impl PromptRenderer for EspeakTts {
    async fn render(&self, text: &str, language: &str) -> Result<AudioHandle, PromptError> {
        check_prompt_size(text)?;

        let mut command = Command::new(&self.binary);
        command
            .arg("--stdout")
            .arg("-v")
            .arg(language)
            .arg(text)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command
            .spawn()
            .map_err(|e| PromptError::Synthesis(format!("failed to spawn espeak-ng: {e}")))?;

        let output = tokio::time::timeout(SYNTH_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                PromptError::Synthesis(format!(
                    "synthesis process timed out after {} seconds",
                    SYNTH_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| PromptError::Synthesis(format!("failed to wait for espeak-ng: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PromptError::Synthesis(format!("espeak-ng failed: {stderr}")));
        }

        // Strip the WAV header to return raw PCM data.
        let wav_data = output.stdout;
        let pcm = if wav_data.len() > WAV_HEADER_BYTES {
            wav_data[WAV_HEADER_BYTES..].to_vec()
        } else {
            wav_data
        };
        Ok(AudioHandle::Pcm(pcm))
    }
}
