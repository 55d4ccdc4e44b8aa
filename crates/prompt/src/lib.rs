//! # Prompt
//!
//! Chat message model shared by the LLM client and the agent, plus the companion persona prompts.
//!
//! - [`ChatMessage`] / [`MessageRole`] / [`ToolCall`]: one-to-one with OpenAI Chat Completions
//!   `messages` entries, including assistant tool calls and tool results.
//! - [`personality`]: built-in personality texts and custom personality files.
//! - [`system`]: the system prompt sent before every agent run.

pub mod personality;
pub mod system;

pub use personality::{
    available_personalities, get_personality, load_personality_file, PersonalityError,
    DEFAULT_PERSONALITY,
};
pub use system::{build_system_prompt, personality_prompt, TOOL_INSTRUCTIONS};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`), possibly carrying tool calls.
    Assistant,
    /// Tool result (API `role: "tool"`), answering one tool call.
    Tool,
}

/// A tool invocation requested by the model. `arguments` is the raw JSON string the model produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    /// Set only on assistant messages that request tools.
    pub tool_calls: Vec<ToolCall>,
    /// Set only on tool messages: the id of the call being answered.
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn plain(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::Assistant, content)
    }

    /// Assistant turn that requests tools; `content` may be empty.
    pub fn assistant_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::plain(MessageRole::Assistant, content)
        }
    }

    /// Tool observation answering `tool_call_id`.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::plain(MessageRole::Tool, content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role_and_tool_fields() {
        assert_eq!(ChatMessage::system("s").role, MessageRole::System);
        assert_eq!(ChatMessage::user("u").role, MessageRole::User);

        let call = ToolCall {
            id: "call_1".to_string(),
            name: "selfie".to_string(),
            arguments: r#"{"input":"beach"}"#.to_string(),
        };
        let asked = ChatMessage::assistant_tool_calls("", vec![call.clone()]);
        assert_eq!(asked.role, MessageRole::Assistant);
        assert_eq!(asked.tool_calls, vec![call]);
        assert!(asked.tool_call_id.is_none());

        let answered = ChatMessage::tool("call_1", "uuid");
        assert_eq!(answered.role, MessageRole::Tool);
        assert_eq!(answered.tool_call_id.as_deref(), Some("call_1"));
        assert!(answered.tool_calls.is_empty());
    }
}
