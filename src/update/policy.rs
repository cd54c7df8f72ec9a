//! Update-policy gate.
//!
//! Whether dynamic updates are accepted at all is a server-level switch:
//! never, always, or only for requests the transport layer has already
//! authenticated. The authentication mechanism itself (TSIG, GSSAPI) lives
//! outside this crate; the caller passes the verdict in.

use serde::Deserialize;
use tracing::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Reject every update request
    #[default]
    Deny,
    /// Accept updates from anyone
    Allow,
    /// Accept updates only on authenticated requests
    Authenticated,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdatePolicy {
    mode: UpdateMode,
}

impl UpdatePolicy {
    pub fn new(mode: UpdateMode) -> Self {
        Self { mode }
    }

    pub fn is_update_allowed(&self, authenticated: bool) -> bool {
        let allowed = match self.mode {
            UpdateMode::Deny => false,
            UpdateMode::Allow => true,
            UpdateMode::Authenticated => authenticated,
        };
        debug!(mode = ?self.mode, authenticated, allowed, "update policy check");
        allowed
    }
}
