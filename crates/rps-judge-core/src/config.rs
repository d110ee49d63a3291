use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "rps-judge.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub version: u32,
    #[serde(default)]
    pub judge: JudgeSettings,
    #[serde(default)]
    pub game: GameSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            judge: JudgeSettings::default(),
            game: GameSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JudgeSettings {
    /// "auto", "gemini", "openai" or "mock"
    pub provider: String,
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Fall back to the mock judge when the hosted judge cannot be reached.
    pub fallback: bool,
    pub prompt_file: Option<PathBuf>,
}

impl Default for JudgeSettings {
    fn default() -> Self {
        Self {
            provider: "auto".to_string(),
            model: None,
            temperature: 0.0,
            max_tokens: 1024,
            timeout_secs: 30,
            fallback: true,
            prompt_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    #[default]
    Bot,
    Human,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    /// Rounds per match; 0 plays one endless session.
    pub match_length: u32,
    pub max_rounds: Option<u32>,
    pub opponent: OpponentKind,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            match_length: 3,
            max_rounds: None,
            opponent: OpponentKind::Bot,
            seed: None,
        }
    }
}

pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: GameConfig = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError::Version {
            found: cfg.version,
            supported: SUPPORTED_CONFIG_VERSION,
        });
    }
    Ok(cfg)
}

/// Loads `path` if given, else the default file when it exists, else defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<GameConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                load_config(default)
            } else {
                Ok(GameConfig::default())
            }
        }
    }
}
