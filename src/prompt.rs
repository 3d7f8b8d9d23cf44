// Prompt template for Meditron-7B, following a ChatML-style turn layout.

const SYSTEM_PROMPT: &str = "You are a helpful medical assistant.";

/// Builds the full generation prompt for a user message.
///
/// The role selects the phrasing of the user turn: "doctor" (matched
/// case-insensitively) gets a doctor-tagged query, everything else is
/// treated as a patient. The prompt always ends with an open assistant
/// turn so the model continues from there.
pub fn format_prompt(message: &str, role: &str) -> String {
    let user_prompt = if role.eq_ignore_ascii_case("doctor") {
        format!("Doctor's query: {}", message)
    } else {
        format!("Patient's query: {}", message)
    };

    format!(
        "<|im_start|>system\n{}<|im_end|>\n<|im_start|>user\n{}<|im_end|>\n<|im_start|>assistant\n",
        SYSTEM_PROMPT, user_prompt
    )
}
