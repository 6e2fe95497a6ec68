//! Placeholder resolution: data handoffs between plan steps

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::cycle::StepRecord;

/// Placeholder the planner uses for a message ID produced by an earlier step
pub const ID_SENTINEL: &str = "<ID from previous step>";

/// Placeholder the planner uses for content extracted by the previous step
pub const CONTENT_SENTINEL: &str = "<Content from previous step>";

/// Matches identifiers following the literal `ID:` marker in tool output
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ID: ([a-zA-Z0-9]+)").expect("valid ID pattern"));

/// Placeholder resolution failures are fatal for the current plan: the
/// remaining steps are cleared and the cycle routes to synthesis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Could not find a message ID from a previous step.")]
    MissingId,

    #[error("Could not find content from a previous step.")]
    MissingContent,
}

/// Resolve sentinel placeholders in a step's kwargs against prior results.
///
/// - The ID sentinel scans all prior results concatenated; the most recently
///   found match wins.
/// - The content sentinel takes the immediately preceding step's result
///   verbatim, never an earlier one.
pub fn resolve_placeholders(
    kwargs: &mut serde_json::Map<String, serde_json::Value>,
    history: &[StepRecord],
) -> Result<(), ResolveError> {
    for value in kwargs.values_mut() {
        let Some(text) = value.as_str() else {
            continue;
        };

        if text.contains(ID_SENTINEL) {
            let id = last_id(history).ok_or(ResolveError::MissingId)?;
            *value = serde_json::Value::String(id);
        } else if text.contains(CONTENT_SENTINEL) {
            let content = history
                .last()
                .map(|record| record.result.clone())
                .ok_or(ResolveError::MissingContent)?;
            *value = serde_json::Value::String(content);
        }
    }
    Ok(())
}

/// Last `ID: <token>` occurrence across the concatenated prior results.
fn last_id(history: &[StepRecord]) -> Option<String> {
    let combined = history
        .iter()
        .map(|record| record.result.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    ID_PATTERN
        .captures_iter(&combined)
        .last()
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tool: &str, result: &str) -> StepRecord {
        StepRecord::new(tool, result, false)
    }

    fn kwargs(pairs: &[(&str, &str)]) -> serde_json::Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_id_resolution_last_occurrence_wins() {
        let history = vec![
            record("search_emails", "Found emails:\nID: aaa111, From: Bob"),
            record("search_emails", "Found emails:\nID: bbb222, From: Alice"),
        ];
        let mut args = kwargs(&[("message_id", ID_SENTINEL)]);
        resolve_placeholders(&mut args, &history).unwrap();
        assert_eq!(args["message_id"], "bbb222");
    }

    #[test]
    fn test_id_resolution_last_within_single_result() {
        let history = vec![record(
            "search_emails",
            "Found emails:\nID: first1, From: Bob\nID: second2, From: Alice",
        )];
        let mut args = kwargs(&[("message_id", ID_SENTINEL)]);
        resolve_placeholders(&mut args, &history).unwrap();
        assert_eq!(args["message_id"], "second2");
    }

    #[test]
    fn test_id_resolution_empty_history_fails() {
        let mut args = kwargs(&[("message_id", ID_SENTINEL)]);
        let err = resolve_placeholders(&mut args, &[]).unwrap_err();
        assert_eq!(err, ResolveError::MissingId);
        assert_eq!(
            err.to_string(),
            "Could not find a message ID from a previous step."
        );
    }

    #[test]
    fn test_id_resolution_no_marker_in_history_fails() {
        let history = vec![record("draft_email", "Draft created for bob@example.com")];
        let mut args = kwargs(&[("message_id", ID_SENTINEL)]);
        assert_eq!(
            resolve_placeholders(&mut args, &history),
            Err(ResolveError::MissingId)
        );
    }

    #[test]
    fn test_content_resolution_uses_immediately_preceding_result() {
        let history = vec![
            record("get_email_content", "older body"),
            record("get_email_content", "newest body"),
        ];
        let mut args = kwargs(&[("text", CONTENT_SENTINEL)]);
        resolve_placeholders(&mut args, &history).unwrap();
        assert_eq!(args["text"], "newest body");
    }

    #[test]
    fn test_content_resolution_empty_history_fails() {
        let mut args = kwargs(&[("text", CONTENT_SENTINEL)]);
        assert_eq!(
            resolve_placeholders(&mut args, &[]),
            Err(ResolveError::MissingContent)
        );
    }

    #[test]
    fn test_non_sentinel_values_untouched() {
        let history = vec![record("search_emails", "ID: abc123")];
        let mut args = kwargs(&[("query", "from:Alice")]);
        args.insert("max_results".to_string(), serde_json::json!(1));
        resolve_placeholders(&mut args, &history).unwrap();
        assert_eq!(args["query"], "from:Alice");
        assert_eq!(args["max_results"], 1);
    }

    #[test]
    fn test_id_pattern_stops_at_non_alphanumeric() {
        let history = vec![record(
            "search_emails",
            "ID: abc123, From: alice@example.com",
        )];
        let mut args = kwargs(&[("message_id", ID_SENTINEL)]);
        resolve_placeholders(&mut args, &history).unwrap();
        assert_eq!(args["message_id"], "abc123");
    }
}
