//! System prompt: personality + tool-use instructions.
//!
//! The model picks tools through native function calling, so the prompt only has to pin down the
//! persona and the one output contract the dispatch loop depends on: media UUIDs returned by tools
//! must appear verbatim in the final answer.

/// Instructions appended after the personality. `{tool_names}` is replaced with the tool list.
pub const TOOL_INSTRUCTIONS: &str = "You can use these tools when they help: {tool_names}.
When a tool returns the UUID of generated media (a selfie, an image, a voice note or a video), your final answer MUST contain that UUID exactly as returned, on its own, so the media can be attached to your message.
Use all tool results to come up with your final answer.
NEVER say you are an AI language model. Always act and respond as your persona.";

/// Personality text, followed by a reply-language instruction when one is configured.
pub fn personality_prompt(personality: &str, reply_language: Option<&str>) -> String {
    let mut out = personality.trim().to_string();
    if let Some(language) = reply_language.map(str::trim).filter(|l| !l.is_empty()) {
        out.push_str("\n\nAlways reply in ");
        out.push_str(language);
        out.push('.');
    }
    out
}

/// Full system prompt for one agent run.
pub fn build_system_prompt<S: AsRef<str>>(
    personality: &str,
    reply_language: Option<&str>,
    tool_names: &[S],
) -> String {
    let mut out = personality_prompt(personality, reply_language);
    if !tool_names.is_empty() {
        let names = tool_names
            .iter()
            .map(|n| n.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str("\n\n");
        out.push_str(&TOOL_INSTRUCTIONS.replace("{tool_names}", &names));
    } else {
        out.push_str("\n\nNEVER say you are an AI language model. Always act and respond as your persona.");
    }
    out
}
