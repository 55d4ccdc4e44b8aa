//! Tests for the speech and talking-video clients.
//!
//! External interactions: HTTP to a local mockito server only.

use std::time::Duration;

use media_client::{SpeechClient, TalkingVideoClient, DEFAULT_SPEECH_MODEL};
use mockito::Matcher;
use serde_json::json;

/// **Test: Speech synthesis posts text and returns the audio bytes.**
///
/// **Setup:** Mock ElevenLabs endpoint for voice `v1` expecting the API key header and JSON body.
/// **Action:** synthesize("hello").
/// **Expected:** Body bytes returned unchanged.
#[tokio::test]
async fn speech_returns_audio_bytes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/text-to-speech/v1")
        .match_header("xi-api-key", "el-key")
        .match_body(Matcher::Json(
            json!({"text": "hello", "model_id": DEFAULT_SPEECH_MODEL}),
        ))
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(vec![0x49u8, 0x44, 0x33, 0x04])
        .create_async()
        .await;

    let client =
        SpeechClient::new("el-key".to_string(), "v1".to_string()).with_base_url(server.url());
    let audio = client.synthesize("hello").await.unwrap();

    mock.assert_async().await;
    assert_eq!(audio, vec![0x49u8, 0x44, 0x33, 0x04]);
}

/// **Test: Non-2xx speech response is an error carrying the status.**
#[tokio::test]
async fn speech_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/text-to-speech/v1")
        .with_status(401)
        .with_body("unauthorized")
        .create_async()
        .await;

    let client =
        SpeechClient::new("bad".to_string(), "v1".to_string()).with_base_url(server.url());
    let err = client.synthesize("hello").await.unwrap_err().to_string();
    assert!(err.contains("401"), "{}", err);
    assert!(err.contains("unauthorized"), "{}", err);
}

/// **Test: Video is created then polled until done.**
///
/// **Setup:** POST /talks returns id `tlk_1`; GET /talks/tlk_1 returns `done` with a result URL.
/// **Action:** create_video("hi there").
/// **Expected:** The result URL; create request carried source_url and the text script.
#[tokio::test]
async fn video_polls_until_done() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/talks")
        .match_header("authorization", "Basic did-key")
        .match_body(Matcher::Json(json!({
            "source_url": "https://example.com/avatar.png",
            "script": {"type": "text", "input": "hi there"}
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"tlk_1","status":"created"}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/talks/tlk_1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"tlk_1","status":"done","result_url":"https://cdn.example.com/tlk_1.mp4"}"#)
        .create_async()
        .await;

    let client = TalkingVideoClient::new(
        "did-key".to_string(),
        "https://example.com/avatar.png".to_string(),
    )
    .with_base_url(server.url())
    .with_polling(Duration::from_millis(1), 3);
    let url = client.create_video("hi there").await.unwrap();

    create.assert_async().await;
    status.assert_async().await;
    assert_eq!(url, "https://cdn.example.com/tlk_1.mp4");
}

/// **Test: Rejected talk is an error.**
#[tokio::test]
async fn video_rejected_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _create = server
        .mock("POST", "/talks")
        .with_status(201)
        .with_body(r#"{"id":"tlk_2"}"#)
        .create_async()
        .await;
    let _status = server
        .mock("GET", "/talks/tlk_2")
        .with_status(200)
        .with_body(r#"{"status":"rejected","error":{"kind":"Moderation"}}"#)
        .create_async()
        .await;

    let client = TalkingVideoClient::new("k".to_string(), "https://example.com/a.png".to_string())
        .with_base_url(server.url())
        .with_polling(Duration::from_millis(1), 3);
    let err = client.create_video("x").await.unwrap_err().to_string();
    assert!(err.contains("rejected"), "{}", err);
}

/// **Test: Talk that never finishes exhausts the poll budget.**
///
/// **Setup:** Status stays `started`; budget of 3 polls.
/// **Expected:** Error mentioning the budget; status endpoint hit exactly 3 times.
#[tokio::test]
async fn video_poll_budget_exhausted() {
    let mut server = mockito::Server::new_async().await;
    let _create = server
        .mock("POST", "/talks")
        .with_status(201)
        .with_body(r#"{"id":"tlk_3"}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/talks/tlk_3")
        .with_status(200)
        .with_body(r#"{"status":"started"}"#)
        .expect(3)
        .create_async()
        .await;

    let client = TalkingVideoClient::new("k".to_string(), "https://example.com/a.png".to_string())
        .with_base_url(server.url())
        .with_polling(Duration::from_millis(1), 3);
    let err = client.create_video("x").await.unwrap_err().to_string();

    status.assert_async().await;
    assert!(err.contains("3 polls"), "{}", err);
}
