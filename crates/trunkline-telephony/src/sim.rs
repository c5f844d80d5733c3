//! In-process simulated backends.
//!
//! [`ScriptedTelephony`] stands in for a real telephony stack: digit
//! collection replies come from a pre-loaded script, and every command
//! the engine issues is appended to a log the tests can assert on.
//! A channel-lost failure can be injected after a set number of
//! commands to exercise mid-call hangup handling.
//!
//! [`StaticDirectory`] serves queue/extension/user records from
//! in-memory maps.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;
use trunkline_types::{AudioHandle, CallInfo, CallStatus, ExtensionInfo, QueueStatus, UserInfo};

use crate::control::TelephonyControl;
use crate::directory::DirectoryLookup;
use crate::error::{LookupError, TelephonyError};

/// One command issued against the simulated telephony backend, in the
/// order received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelephonyCommand {
    PlayAudio {
        call_id: String,
        audio: String,
    },
    CollectDigits {
        call_id: String,
        timeout: Duration,
        count: u8,
    },
    Bridge {
        call_id: String,
        destination: String,
    },
    SetRecording {
        call_id: String,
        enabled: bool,
    },
}

#[derive(Debug, Default)]
struct ScriptedState {
    digit_script: VecDeque<String>,
    commands: Vec<TelephonyCommand>,
    /// Commands remaining before the channel drops; `None` disables
    /// hangup injection.
    commands_until_hangup: Option<usize>,
}

/// A simulated telephony backend driven by a digit script.
#[derive(Debug, Default)]
pub struct ScriptedTelephony {
    state: Mutex<ScriptedState>,
}

impl ScriptedTelephony {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose digit-collection calls reply with the
    /// given strings in order, then with "" (no input) when exhausted.
    pub fn with_digits<I, S>(digits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sim = Self::new();
        let state = sim.state.get_mut();
        for d in digits {
            state.digit_script.push_back(d.into());
        }
        sim
    }

    /// Drops the channel (every call fails with `ChannelLost`) after
    /// `commands` more commands have been accepted.
    pub async fn hang_up_after(&self, commands: usize) {
        self.state.lock().await.commands_until_hangup = Some(commands);
    }

    /// Appends digits to the reply script.
    pub async fn push_digits(&self, digits: impl Into<String>) {
        self.state.lock().await.digit_script.push_back(digits.into());
    }

    /// Returns a snapshot of every command received so far.
    pub async fn commands(&self) -> Vec<TelephonyCommand> {
        self.state.lock().await.commands.clone()
    }

    /// Records a command, honoring the injected hangup countdown.
    async fn record(&self, command: TelephonyCommand) -> Result<(), TelephonyError> {
        let mut state = self.state.lock().await;
        if let Some(remaining) = state.commands_until_hangup {
            if remaining == 0 {
                return Err(TelephonyError::ChannelLost(
                    "simulated caller hangup".to_string(),
                ));
            }
            state.commands_until_hangup = Some(remaining - 1);
        }
        debug!(?command, "simulated telephony command");
        state.commands.push(command);
        Ok(())
    }
}

#[async_trait::async_trait]
impl TelephonyControl for ScriptedTelephony {
    async fn call_info(&self, call_id: &str) -> Result<CallInfo, TelephonyError> {
        Ok(CallInfo {
            call_id: call_id.to_string(),
            status: CallStatus::Active,
            caller_id: Some("5550100".to_string()),
        })
    }

    async fn play_audio(&self, call_id: &str, audio: &AudioHandle) -> Result<(), TelephonyError> {
        self.record(TelephonyCommand::PlayAudio {
            call_id: call_id.to_string(),
            audio: audio.describe(),
        })
        .await
    }

    async fn collect_digits(
        &self,
        call_id: &str,
        timeout: Duration,
        count: u8,
    ) -> Result<String, TelephonyError> {
        self.record(TelephonyCommand::CollectDigits {
            call_id: call_id.to_string(),
            timeout,
            count,
        })
        .await?;
        Ok(self
            .state
            .lock()
            .await
            .digit_script
            .pop_front()
            .unwrap_or_default())
    }

    async fn bridge(&self, call_id: &str, destination: &str) -> Result<(), TelephonyError> {
        self.record(TelephonyCommand::Bridge {
            call_id: call_id.to_string(),
            destination: destination.to_string(),
        })
        .await
    }

    async fn set_recording(&self, call_id: &str, enabled: bool) -> Result<(), TelephonyError> {
        self.record(TelephonyCommand::SetRecording {
            call_id: call_id.to_string(),
            enabled,
        })
        .await
    }
}

/// A directory backend serving records from in-memory maps.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    queues: HashMap<String, QueueStatus>,
    extensions: HashMap<String, ExtensionInfo>,
    users: HashMap<String, UserInfo>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue(mut self, status: QueueStatus) -> Self {
        self.queues.insert(status.queue_id.clone(), status);
        self
    }

    pub fn with_extension(mut self, info: ExtensionInfo) -> Self {
        self.extensions.insert(info.extension.clone(), info);
        self
    }

    pub fn with_user(mut self, info: UserInfo) -> Self {
        self.users.insert(info.user_id.clone(), info);
        self
    }
}

#[async_trait::async_trait]
impl DirectoryLookup for StaticDirectory {
    async fn queue_agents(&self, queue_id: &str) -> Result<QueueStatus, LookupError> {
        self.queues
            .get(queue_id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(queue_id.to_string()))
    }

    async fn extension_details(&self, extension: &str) -> Result<ExtensionInfo, LookupError> {
        self.extensions
            .get(extension)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(extension.to_string()))
    }

    async fn user_details(&self, user_id: &str) -> Result<UserInfo, LookupError> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn digit_script_replies_in_order_then_empty() {
        let sim = ScriptedTelephony::with_digits(["1", "9"]);
        let t = Duration::from_secs(5);
        assert_eq!(sim.collect_digits("c1", t, 1).await.expect("reply"), "1");
        assert_eq!(sim.collect_digits("c1", t, 1).await.expect("reply"), "9");
        // Exhausted script means timeout with no input.
        assert_eq!(sim.collect_digits("c1", t, 1).await.expect("reply"), "");
    }

    #[tokio::test]
    async fn commands_are_logged_in_order() {
        let sim = ScriptedTelephony::with_digits(["1"]);
        sim.play_audio("c1", &AudioHandle::Uri("tts://en/hello".to_string()))
            .await
            .expect("play should succeed");
        sim.bridge("c1", "sales_queue").await.expect("bridge");

        let log = sim.commands().await;
        assert_eq!(log.len(), 2);
        assert_eq!(
            log[1],
            TelephonyCommand::Bridge {
                call_id: "c1".to_string(),
                destination: "sales_queue".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn injected_hangup_drops_the_channel() {
        let sim = ScriptedTelephony::new();
        sim.hang_up_after(1).await;
        sim.bridge("c1", "x").await.expect("first command accepted");
        let err = sim
            .bridge("c1", "y")
            .await
            .expect_err("channel should be lost");
        assert!(matches!(err, TelephonyError::ChannelLost(_)));
    }

    #[tokio::test]
    async fn static_directory_reports_missing_records() {
        let dir = StaticDirectory::new().with_user(UserInfo {
            user_id: "u1".to_string(),
            name: "Ada".to_string(),
            extension: Some("1001".to_string()),
        });
        assert!(dir.user_details("u1").await.is_ok());
        assert!(matches!(
            dir.queue_agents("sales_queue").await,
            Err(LookupError::NotFound(_))
        ));
    }
}
