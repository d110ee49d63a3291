use crate::errors::JudgeError;
use crate::model::Verdict;
use crate::providers::llm::LlmClient;

pub(crate) async fn call_judge(
    judge: &str,
    client: &dyn LlmClient,
    system_prompt: &str,
    prompt: &str,
) -> Result<Verdict, JudgeError> {
    let resp = client
        .complete(prompt, Some(system_prompt))
        .await
        .map_err(|e| JudgeError::unavailable(judge, e))?;
    tracing::debug!(judge, bytes = resp.text.len(), "judge replied");
    parse_verdict(judge, &resp.text)
}

/// Extracts and shape-checks a verdict from untrusted model output.
///
/// Each `{` is tried in turn and the first JSON object carrying a verdict
/// section wins, so prose, braces in prose or a markdown fence before the
/// object are skipped. Anything after that object is ignored. When no
/// candidate qualifies, the first candidate's problem is reported.
pub(crate) fn parse_verdict(judge: &str, text: &str) -> Result<Verdict, JudgeError> {
    let text = text.trim();
    let mut first = None;
    let mut chosen = None;
    for (start, _) in text.match_indices('{') {
        let Some(parsed) = first_value(&text[start..]) else {
            continue;
        };
        let has_section = matches!(
            &parsed,
            Ok(serde_json::Value::Object(obj))
                if Verdict::SECTIONS.iter().any(|s| obj.contains_key(*s))
        );
        if has_section {
            chosen = Some(parsed);
            break;
        }
        if first.is_none() {
            first = Some(parsed);
        }
    }

    let val = chosen
        .or(first)
        .ok_or_else(|| JudgeError::malformed(judge, "no JSON object found in judge output"))?
        .map_err(|e| JudgeError::malformed(judge, format!("invalid JSON: {}", e)))?;

    let obj = val
        .as_object()
        .ok_or_else(|| JudgeError::malformed(judge, "judge output is not a JSON object"))?;
    for section in Verdict::SECTIONS {
        match obj.get(section) {
            None => {
                return Err(JudgeError::malformed(
                    judge,
                    format!("missing section '{}'", section),
                ))
            }
            Some(v) if !v.is_object() => {
                return Err(JudgeError::malformed(
                    judge,
                    format!("section '{}' is not an object", section),
                ))
            }
            Some(_) => {}
        }
    }

    serde_json::from_value(val)
        .map_err(|e| JudgeError::malformed(judge, format!("unexpected verdict shape: {}", e)))
}

fn first_value(text: &str) -> Option<serde_json::Result<serde_json::Value>> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<serde_json::Value>()
        .next()
}
