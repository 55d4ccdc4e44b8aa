//! Tests for OpenAILlmClient against a mock Chat Completions endpoint.
//!
//! External interactions: HTTP to a local mockito server only.

use llm_client::{LlmClient, OpenAILlmClient, ToolSpec};
use mockito::Matcher;
use prompt::ChatMessage;
use serde_json::json;

fn completion_body(message: serde_json::Value) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": message,
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
    .to_string()
}

/// **Test: Plain answer is returned as content without tool calls.**
///
/// **Setup:** Mock server answers with an assistant message.
/// **Action:** chat with no tools.
/// **Expected:** Content matches; request carried the configured model and no `tools` field.
#[tokio::test]
async fn chat_returns_text_answer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({"model": "gpt-4"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(json!({"role": "assistant", "content": "Hi there!"})))
        .create_async()
        .await;

    let client = OpenAILlmClient::with_base_url("sk-test-key-123456".to_string(), server.url())
        .with_model("gpt-4");
    let reply = client
        .chat(&[ChatMessage::system("s"), ChatMessage::user("hello")], &[])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply.content.as_deref(), Some("Hi there!"));
    assert!(!reply.has_tool_calls());
}

/// **Test: Tool calls in the response are mapped back to ToolCall.**
///
/// **Setup:** Mock server answers with one function tool call.
/// **Action:** chat with one tool spec.
/// **Expected:** One ToolCall with id, name and raw arguments; request contained the tool.
#[tokio::test]
async fn chat_maps_tool_calls() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "tools": [{"type": "function", "function": {"name": "selfie"}}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {"name": "selfie", "arguments": "{\"input\":\"beach\"}"}
            }]
        })))
        .create_async()
        .await;

    let client = OpenAILlmClient::with_base_url("sk-test".to_string(), server.url());
    let tools = [ToolSpec {
        name: "selfie".to_string(),
        description: "Take a selfie".to_string(),
        parameters: json!({"type": "object", "properties": {"input": {"type": "string"}}}),
    }];
    let reply = client.chat(&[ChatMessage::user("pic?")], &tools).await.unwrap();

    mock.assert_async().await;
    assert!(reply.content.is_none());
    assert_eq!(reply.tool_calls.len(), 1);
    assert_eq!(reply.tool_calls[0].id, "call_1");
    assert_eq!(reply.tool_calls[0].name, "selfie");
    assert_eq!(reply.tool_calls[0].arguments, r#"{"input":"beach"}"#);
}

/// **Test: API error is surfaced as Err.**
#[tokio::test]
async fn chat_propagates_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"bad key","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#)
        .create_async()
        .await;

    let client = OpenAILlmClient::with_base_url("sk-bad".to_string(), server.url());
    assert!(client.chat(&[ChatMessage::user("hi")], &[]).await.is_err());
}
