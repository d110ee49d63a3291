//! Error types for judging and configuration.

use std::path::PathBuf;

/// Failures of a judge collaborator. Invalid moves are never errors; they are
/// reported inside the verdict.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    /// The provider could not be reached, refused the credentials, or
    /// returned a non-success status.
    #[error("judge '{judge}' unavailable: {source:#}")]
    Unavailable {
        judge: String,
        #[source]
        source: anyhow::Error,
    },

    /// The provider answered, but not with a usable verdict.
    #[error("malformed verdict from judge '{judge}': {reason}")]
    MalformedVerdict { judge: String, reason: String },
}

impl JudgeError {
    pub fn unavailable(judge: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Unavailable {
            judge: judge.into(),
            source,
        }
    }

    pub fn malformed(judge: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedVerdict {
            judge: judge.into(),
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Unrecoverable setup problems. These end the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported config version {found} (supported: {supported})")]
    Version { found: u32, supported: u32 },

    #[error("failed to read prompt file {path}: {source}")]
    Prompt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown judge provider: {0}")]
    UnknownProvider(String),

    #[error("judge provider '{provider}' selected but {env_var} is not set")]
    MissingCredential {
        provider: String,
        env_var: &'static str,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}
