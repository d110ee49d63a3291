use crate::cli::args::JudgeArgs;
use rps_judge_core::config::{GameConfig, JudgeSettings};
use rps_judge_core::errors::ConfigError;
use rps_judge_core::judge::llm::prompt::{load_system_prompt, SYSTEM_PROMPT};
use rps_judge_core::judge::{FailoverJudge, Judge, LlmJudge, MockJudge};
use rps_judge_core::providers::llm::gemini::{self, GeminiClient};
use rps_judge_core::providers::llm::openai::{self, OpenAIClient};
use rps_judge_core::providers::llm::tracing::TracingLlmClient;
use rps_judge_core::providers::llm::LlmClient;
use std::sync::Arc;
use std::time::Duration;

pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
pub const FORCE_MOCK_ENV: &str = "MOCK_GEMINI";

/// Config file values overridden by flags and their env fallbacks.
pub fn judge_settings(args: &JudgeArgs, cfg: &GameConfig) -> JudgeSettings {
    let mut s = cfg.judge.clone();
    if let Some(p) = &args.judge {
        s.provider = p.clone();
    }
    if let Some(m) = &args.judge_model {
        s.model = Some(m.clone());
    }
    if let Some(t) = args.judge_temperature {
        s.temperature = t;
    }
    if let Some(n) = args.judge_max_tokens {
        s.max_tokens = n;
    }
    if let Some(t) = args.judge_timeout_secs {
        s.timeout_secs = t;
    }
    if args.no_fallback {
        s.fallback = false;
    }
    if let Some(p) = &args.prompt_file {
        s.prompt_file = Some(p.clone());
    }
    s
}

pub fn effective_prompt(settings: &JudgeSettings) -> Result<String, ConfigError> {
    match &settings.prompt_file {
        Some(path) => load_system_prompt(path),
        None => Ok(SYSTEM_PROMPT.to_string()),
    }
}

pub fn build_judge(settings: &JudgeSettings) -> Result<Arc<dyn Judge>, ConfigError> {
    build_judge_with_env(settings, |key| std::env::var(key).ok())
}

/// Selects and wires the judge. `env` looks up credentials so tests need not
/// touch the process environment.
pub fn build_judge_with_env(
    settings: &JudgeSettings,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn Judge>, ConfigError> {
    let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if lookup(FORCE_MOCK_ENV).as_deref() == Some("1") {
        tracing::info!("{}=1, using the mock judge", FORCE_MOCK_ENV);
        return Ok(Arc::new(MockJudge::new()));
    }

    if settings.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "judge timeout must be at least 1 second".to_string(),
        ));
    }

    let provider = settings.provider.trim().to_ascii_lowercase();
    let client: Arc<dyn LlmClient> = match provider.as_str() {
        "mock" => return Ok(Arc::new(MockJudge::new())),
        "auto" => match lookup(GEMINI_KEY_ENV) {
            Some(key) => gemini_client(settings, key)?,
            None => {
                tracing::warn!(
                    "{} not set. Starting in MOCK mode for local testing.",
                    GEMINI_KEY_ENV
                );
                return Ok(Arc::new(MockJudge::new()));
            }
        },
        "gemini" => {
            let key = lookup(GEMINI_KEY_ENV).ok_or_else(|| ConfigError::MissingCredential {
                provider: provider.clone(),
                env_var: GEMINI_KEY_ENV,
            })?;
            gemini_client(settings, key)?
        }
        "openai" => {
            let key = lookup(OPENAI_KEY_ENV).ok_or_else(|| ConfigError::MissingCredential {
                provider: provider.clone(),
                env_var: OPENAI_KEY_ENV,
            })?;
            let model = settings
                .model
                .clone()
                .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string());
            let client = OpenAIClient::new(
                model,
                key,
                settings.temperature,
                settings.max_tokens,
                Duration::from_secs(settings.timeout_secs),
            )
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;
            Arc::new(client)
        }
        other => return Err(ConfigError::UnknownProvider(other.to_string())),
    };

    let prompt = effective_prompt(settings)?;
    let client: Arc<dyn LlmClient> = Arc::new(TracingLlmClient::new(client));
    let hosted: Arc<dyn Judge> = Arc::new(LlmJudge::with_system_prompt(client, prompt));
    if settings.fallback {
        Ok(Arc::new(FailoverJudge::new(hosted, Arc::new(MockJudge::new()))))
    } else {
        Ok(hosted)
    }
}

fn gemini_client(settings: &JudgeSettings, key: String) -> Result<Arc<dyn LlmClient>, ConfigError> {
    let model = settings
        .model
        .clone()
        .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());
    let client = GeminiClient::new(
        model,
        key,
        settings.temperature,
        settings.max_tokens,
        Duration::from_secs(settings.timeout_secs),
    )
    .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    fn settings(provider: &str) -> JudgeSettings {
        JudgeSettings {
            provider: provider.to_string(),
            ..JudgeSettings::default()
        }
    }

    #[test]
    fn auto_without_key_uses_mock() {
        let judge = build_judge_with_env(&settings("auto"), env(&[])).unwrap();
        assert_eq!(judge.name(), "mock");
    }

    #[test]
    fn auto_with_key_uses_gemini() {
        let judge =
            build_judge_with_env(&settings("auto"), env(&[(GEMINI_KEY_ENV, "k")])).unwrap();
        assert_eq!(judge.name(), "gemini");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = build_judge_with_env(&settings("gemini"), env(&[(GEMINI_KEY_ENV, "  ")]))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConfigError::MissingCredential {
                env_var: GEMINI_KEY_ENV,
                ..
            }
        ));
    }

    #[test]
    fn force_mock_wins_over_credentials() {
        let judge = build_judge_with_env(
            &settings("openai"),
            env(&[(FORCE_MOCK_ENV, "1"), (OPENAI_KEY_ENV, "k")]),
        )
        .unwrap();
        assert_eq!(judge.name(), "mock");
    }

    #[test]
    fn openai_requires_its_own_key() {
        let err = build_judge_with_env(&settings("openai"), env(&[(GEMINI_KEY_ENV, "k")]))
            .err()
            .unwrap();
        assert!(err.to_string().contains(OPENAI_KEY_ENV));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = build_judge_with_env(&settings("claude"), env(&[]))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::UnknownProvider(p) if p == "claude"));
    }

    #[test]
    fn provider_name_is_case_insensitive() {
        let judge = build_judge_with_env(&settings(" Mock "), env(&[])).unwrap();
        assert_eq!(judge.name(), "mock");
    }

    #[test]
    fn flags_override_config() {
        let cfg = GameConfig::default();
        let args = JudgeArgs {
            judge: Some("openai".into()),
            judge_timeout_secs: Some(5),
            no_fallback: true,
            ..JudgeArgs::default()
        };
        let s = judge_settings(&args, &cfg);
        assert_eq!(s.provider, "openai");
        assert_eq!(s.timeout_secs, 5);
        assert!(!s.fallback);
        assert_eq!(s.max_tokens, cfg.judge.max_tokens);
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let s = JudgeSettings {
            timeout_secs: 0,
            ..settings("gemini")
        };
        let err = build_judge_with_env(&s, env(&[(GEMINI_KEY_ENV, "k")]))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
