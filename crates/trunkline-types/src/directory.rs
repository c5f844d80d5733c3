//! Directory records returned by the lookup backends.
//!
//! These lookups are best-effort enrichment for transfer actions: the
//! engine logs what it learns but never blocks a bridge on a failed or
//! empty lookup.

use serde::{Deserialize, Serialize};

/// Availability of a single queue agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Available,
    Busy,
    LoggedOut,
}

/// One agent attached to a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueAgent {
    pub id: String,
    pub status: AgentStatus,
}

/// The agents currently attached to a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub queue_id: String,
    pub agents: Vec<QueueAgent>,
}

impl QueueStatus {
    /// Number of agents currently available to take a call.
    pub fn available_agents(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.status == AgentStatus::Available)
            .count()
    }
}

/// Configuration details for an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionInfo {
    pub extension: String,
    /// Extension class, e.g. "internal" or "voicemail".
    pub kind: String,
    /// Device the extension rings, if provisioned.
    pub device: Option<String>,
}

/// A user record from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub name: String,
    pub extension: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_agents_counts_only_available() {
        let status = QueueStatus {
            queue_id: "sales_queue".to_string(),
            agents: vec![
                QueueAgent {
                    id: "agent1".to_string(),
                    status: AgentStatus::Available,
                },
                QueueAgent {
                    id: "agent2".to_string(),
                    status: AgentStatus::Busy,
                },
                QueueAgent {
                    id: "agent3".to_string(),
                    status: AgentStatus::LoggedOut,
                },
            ],
        };
        assert_eq!(status.available_agents(), 1);
    }
}
