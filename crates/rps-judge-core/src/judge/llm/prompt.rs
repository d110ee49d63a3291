use crate::model::RoundRequest;
use crate::errors::ConfigError;
use std::path::Path;

pub const SYSTEM_PROMPT: &str = include_str!("../../../prompts/judge_prompt.txt");

/// Reads a replacement system prompt from disk.
pub fn load_system_prompt(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Prompt {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn build_round_prompt(request: &RoundRequest) -> anyhow::Result<String> {
    let context = serde_json::to_string_pretty(request)?;
    Ok(format!(
        "Please evaluate this round:\n\n{}\n\n\
         Remember to output VALID JSON with the structure defined in your instructions.",
        context
    ))
}
