//! The directory-lookup capability trait.

use trunkline_types::{ExtensionInfo, QueueStatus, UserInfo};

use crate::error::LookupError;

/// Read-only lookups against the platform directory and configuration
/// store.
///
/// All lookups are best-effort: a failure is logged by the caller and
/// never blocks the flow action that requested it.
#[async_trait::async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Returns the agents attached to a queue.
    async fn queue_agents(&self, queue_id: &str) -> Result<QueueStatus, LookupError>;

    /// Returns configuration details for an extension.
    async fn extension_details(&self, extension: &str) -> Result<ExtensionInfo, LookupError>;

    /// Returns a user record from the directory.
    async fn user_details(&self, user_id: &str) -> Result<UserInfo, LookupError>;
}
