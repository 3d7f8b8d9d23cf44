use std::env;
use anyhow::Result;
use reqwest::Client;
use serde_json::{json, Value};
use log::{info, debug};

/// Hugging Face identifier of the model served by the runtime.
pub const MODEL_ID: &str = "epfl-llm/meditron-7b";

/// Identifier reported to clients in successful responses.
pub const MODEL_TAG: &str = "meditron-7b-4bit";

// The assistant reply is taken from after the last occurrence of this
// marker. It does not match the ChatML turn markers in the prompt
// template; when it never appears the full generated text is returned.
const REPLY_MARKER: &str = "Meditron:";

/// Sampling parameters forwarded to the generation call. Values are not
/// validated here; an out-of-range value (a negative max_length, say) is
/// forwarded verbatim and fails at the runtime.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub max_length: i64,
    pub temperature: f32,
    pub top_p: f32,
}

// A wrapper for the model runtime's text-generation API. Built once at
// startup and shared read-only across requests; nothing here is mutated
// after construction.
pub struct MeditronPipeline {
    server_url: String,
    client: Client,
}

impl MeditronPipeline {
    pub async fn new() -> Result<Self> {
        info!("Initializing pipeline for {} (4-bit)", MODEL_ID);

        // Get runtime URL from environment or use default
        let server_url = env::var("MEDITRON_SERVER_URL")
            .unwrap_or_else(|_| "http://localhost:8081".to_string());

        info!("Using model runtime at: {}", server_url);

        Ok(Self::from_url(server_url))
    }

    pub fn from_url(server_url: String) -> Self {
        Self {
            server_url,
            client: Client::new(),
        }
    }

    /// Runs one generation pass and returns the extracted assistant reply.
    ///
    /// The connection to the runtime is held open for the full inference;
    /// there is no timeout, retry, or cancellation path.
    pub async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        info!("Generating with max_length: {}", params.max_length);
        debug!("Prompt: {}", prompt);

        let url = format!("{}/generate", self.server_url);

        // Sampling is always enabled; the runtime pads with its
        // end-of-sequence token.
        let payload = json!({
            "inputs": prompt,
            "parameters": {
                "max_length": params.max_length,
                "temperature": params.temperature,
                "top_p": params.top_p,
                "do_sample": true,
            }
        });

        debug!("Payload: {}", payload);

        let response = self.client.post(&url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("generation request failed: {}", error_text));
        }

        let body: Value = response.json().await?;
        debug!("Response JSON: {}", body);

        let full_text = first_generated_text(&body)?;

        info!("Generated {} characters", full_text.len());
        Ok(extract_reply(full_text).to_string())
    }
}

// Pulls the first candidate's text out of the runtime's response, which
// is expected to be a JSON array of results carrying "generated_text".
fn first_generated_text(body: &Value) -> Result<&str> {
    body.get(0)
        .and_then(|result| result.get("generated_text"))
        .and_then(|text| text.as_str())
        .ok_or_else(|| anyhow::anyhow!("malformed pipeline output: missing generated_text"))
}

/// Trims the assistant reply out of the full generated text: everything
/// after the last reply marker, or the whole text when the marker is
/// absent, with surrounding whitespace removed.
pub fn extract_reply(full_text: &str) -> &str {
    match full_text.rfind(REPLY_MARKER) {
        Some(idx) => full_text[idx + REPLY_MARKER.len()..].trim(),
        None => full_text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_follows_last_marker() {
        let text = "some prompt echo Meditron: first Meditron:  second reply \n";
        assert_eq!(extract_reply(text), "second reply");
    }

    #[test]
    fn single_marker_keeps_suffix() {
        assert_eq!(
            extract_reply("Meditron: Drink water and rest."),
            "Drink water and rest."
        );
    }

    #[test]
    fn missing_marker_returns_full_trimmed_text() {
        assert_eq!(
            extract_reply("  plain generated text\n"),
            "plain generated text"
        );
    }

    #[test]
    fn marker_at_end_yields_empty_reply() {
        assert_eq!(extract_reply("lead-in Meditron:"), "");
    }

    #[test]
    fn first_generated_text_reads_first_candidate() {
        let body = json!([
            { "generated_text": "candidate one" },
            { "generated_text": "candidate two" }
        ]);
        assert_eq!(first_generated_text(&body).unwrap(), "candidate one");
    }

    #[test]
    fn empty_array_is_malformed() {
        assert!(first_generated_text(&json!([])).is_err());
    }

    #[test]
    fn non_array_body_is_malformed() {
        assert!(first_generated_text(&json!({ "generated_text": "x" })).is_err());
    }

    #[test]
    fn missing_field_is_malformed() {
        assert!(first_generated_text(&json!([{ "text": "x" }])).is_err());
    }

    #[test]
    fn non_string_field_is_malformed() {
        assert!(first_generated_text(&json!([{ "generated_text": 42 }])).is_err());
    }
}
