//! Tool trait: one capability the model can call with a single string input.

use async_trait::async_trait;
use llm_client::ToolSpec;
use serde_json::{json, Value};

#[async_trait]
pub trait Tool: Send + Sync {
    /// Name used in function calling.
    fn name(&self) -> &str;

    /// When the model should use the tool.
    fn description(&self) -> &str;

    /// What the single `input` argument should contain.
    fn input_description(&self) -> &str {
        "The input for the tool"
    }

    /// Runs the tool. The returned string is the observation shown to the model.
    async fn run(&self, input: &str) -> anyhow::Result<String>;

    /// Function-calling spec: one required string argument named `input`.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "input": {
                        "type": "string",
                        "description": self.input_description(),
                    }
                },
                "required": ["input"],
            }),
        }
    }
}

/// Extracts the tool input from model-provided arguments.
///
/// Accepts `{"input": ...}`, a bare JSON string, or anything else as raw text.
pub fn parse_tool_input(arguments: &str) -> String {
    match serde_json::from_str::<Value>(arguments) {
        Ok(Value::Object(map)) => match map.get("input") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => arguments.to_string(),
        },
        Ok(Value::String(s)) => s,
        _ => arguments.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Repeats the input"
        }
        async fn run(&self, input: &str) -> anyhow::Result<String> {
            Ok(input.to_string())
        }
    }

    #[test]
    fn test_spec_has_single_input_argument() {
        let spec = Echo.spec();
        assert_eq!(spec.name, "echo");
        assert_eq!(spec.parameters["required"], json!(["input"]));
        assert_eq!(spec.parameters["properties"]["input"]["type"], "string");
    }

    #[test]
    fn test_parse_tool_input_shapes() {
        assert_eq!(parse_tool_input(r#"{"input":"a cat"}"#), "a cat");
        assert_eq!(parse_tool_input(r#""a dog""#), "a dog");
        assert_eq!(parse_tool_input("just text"), "just text");
        assert_eq!(parse_tool_input(r#"{"input":3}"#), "3");
        assert_eq!(parse_tool_input(r#"{"query":"x"}"#), r#"{"query":"x"}"#);
    }
}
