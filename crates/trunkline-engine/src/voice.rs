//! Shared prompt-speaking helper.

use std::sync::Arc;

use tracing::warn;
use trunkline_prompt::PromptRenderer;
use trunkline_telephony::TelephonyControl;

use crate::error::EngineError;
use crate::session::SessionState;

/// Renders `text` in the session language and plays it to the call.
///
/// Rendering failures are logged and the step continues without
/// playback; synthesis must not take the call down. Playback failures
/// propagate, since they mean the channel itself is in trouble.
pub(crate) async fn speak(
    telephony: &Arc<dyn TelephonyControl>,
    renderer: &Arc<dyn PromptRenderer>,
    session: &SessionState,
    text: &str,
) -> Result<(), EngineError> {
    let audio = match renderer.render(text, &session.language).await {
        Ok(audio) => audio,
        Err(e) => {
            warn!(
                call_id = %session.call_id,
                error = %e,
                "prompt rendering failed, continuing without playback"
            );
            return Ok(());
        }
    };
    telephony.play_audio(&session.call_id, &audio).await?;
    Ok(())
}
