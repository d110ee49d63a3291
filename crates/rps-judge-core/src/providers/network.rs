//! Outbound request gate for hosted judges.
//!
//! With `RPS_JUDGE_NETWORK_POLICY=deny` (or `offline`) a game never leaves the
//! machine: hosted judge calls fail as unavailable and failover takes over.

use std::sync::Mutex;

pub const NETWORK_POLICY_ENV: &str = "RPS_JUDGE_NETWORK_POLICY";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NetworkPolicy {
    #[default]
    Allow,
    Deny { reason: String },
}

impl NetworkPolicy {
    /// Policy requested through the environment, if any.
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var(NETWORK_POLICY_ENV).ok()?;
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "deny" | "offline" => Some(Self::Deny {
                reason: format!("{}={}", NETWORK_POLICY_ENV, value),
            }),
            "allow" | "" => Some(Self::Allow),
            other => {
                tracing::warn!("ignoring unrecognized {}={}", NETWORK_POLICY_ENV, other);
                None
            }
        }
    }
}

static OVERRIDE: Mutex<Option<NetworkPolicy>> = Mutex::new(None);

/// In-process policy that holds until dropped. An environment `deny` still wins.
#[must_use = "the override ends when the guard is dropped"]
pub struct PolicyOverride {
    previous: Option<NetworkPolicy>,
}

impl PolicyOverride {
    pub fn offline(reason: impl Into<String>) -> Self {
        Self::install(NetworkPolicy::Deny {
            reason: reason.into(),
        })
    }

    pub fn allow() -> Self {
        Self::install(NetworkPolicy::Allow)
    }

    fn install(policy: NetworkPolicy) -> Self {
        let mut slot = OVERRIDE.lock().unwrap_or_else(|e| e.into_inner());
        Self {
            previous: slot.replace(policy),
        }
    }
}

impl Drop for PolicyOverride {
    fn drop(&mut self) {
        let mut slot = OVERRIDE.lock().unwrap_or_else(|e| e.into_inner());
        *slot = self.previous.take();
    }
}

pub fn current_policy() -> NetworkPolicy {
    let from_env = NetworkPolicy::from_env();
    if let Some(deny @ NetworkPolicy::Deny { .. }) = from_env {
        return deny;
    }
    let slot = OVERRIDE.lock().unwrap_or_else(|e| e.into_inner());
    slot.clone().or(from_env).unwrap_or_default()
}

/// Fails when the current policy forbids reaching `target`.
pub fn ensure_allowed(target: &str) -> anyhow::Result<()> {
    match current_policy() {
        NetworkPolicy::Allow => Ok(()),
        NetworkPolicy::Deny { reason } => anyhow::bail!(
            "outbound network blocked by policy (target={}): {}",
            target,
            reason
        ),
    }
}
