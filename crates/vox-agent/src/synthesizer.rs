//! Final response synthesis

use crate::cycle::Cycle;
use crate::error::Result;
use crate::model::LanguageModel;

/// Produce the final natural-language response for a cycle.
///
/// A stored cycle error short-circuits: the error text is the response,
/// verbatim, with no model call. Otherwise one model invocation renders the
/// result history into a reply. No retries; a model failure propagates.
pub async fn synthesize(model: &dyn LanguageModel, cycle: &Cycle) -> Result<String> {
    if let Some(error) = &cycle.error {
        return Ok(error.clone());
    }

    let results = serde_json::to_string_pretty(&cycle.results)?;
    let prompt = format!(
        r#"You are an email assistant. Based on the user's original request and the results of the tools you used, provide a clear, concise, and friendly final response.

Original Request: "{request}"
Tool Results:
{results}

Final Response:
"#,
        request = cycle.raw_input,
        results = results,
    );

    let response = model.complete(&prompt).await?;
    Ok(response.trim().to_string())
}
