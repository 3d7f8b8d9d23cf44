use serde::{Deserialize, Serialize};

fn default_role() -> String {
    "patient".to_string()
}

fn default_max_length() -> i64 {
    200
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

/// Body of `POST /chat`. Only `message` is required; the rest fall back
/// to fixed defaults. Values are not range-checked here; out-of-range
/// parameters fail at the generation call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_max_length")]
    pub max_length: i64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub model: String,
}
