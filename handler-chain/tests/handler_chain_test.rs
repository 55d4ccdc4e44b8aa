//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after order, before stopping the chain, Reply stopping the handle phase and
//! being passed to after, Stop short-circuiting, and an empty chain.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dbot_core::{Chat, Handler, HandlerResponse, Message, ReplyBlock, User};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message::text(
        User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content,
    )
}

struct CountingHandler {
    handle_count: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }
}

struct ReplyHandler(&'static str);

#[async_trait::async_trait]
impl Handler for ReplyHandler {
    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        Ok(HandlerResponse::Reply(vec![ReplyBlock::text(self.0)]))
    }
}

/// **Test: An empty chain answers Continue.**
#[tokio::test]
async fn test_empty_chain_returns_continue() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let result = chain.handle(&create_test_message("hi")).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
}

/// **Test: before returning false stops the chain; no handle runs.**
///
/// **Setup:** A blocking handler (before → false) followed by a counting handler.
/// **Expected:** Stop; handle count 0.
#[tokio::test]
async fn test_before_false_stops_chain() {
    struct BlockingHandler;

    #[async_trait::async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: The first Reply ends the handle phase and is what after() sees.**
///
/// **Setup:** Capture handler, a counting handler, a reply handler, then another counting handler.
/// **Expected:** Reply(["first"]); first counter 1, trailing counter 0; capture saw the blocks.
#[tokio::test]
async fn test_reply_stops_chain_and_passes_to_after() {
    struct CaptureHandler {
        seen: Arc<Mutex<Option<HandlerResponse>>>,
    }

    #[async_trait::async_trait]
    impl Handler for CaptureHandler {
        async fn after(
            &self,
            _message: &Message,
            response: &HandlerResponse,
        ) -> dbot_core::Result<()> {
            *self.seen.lock().unwrap() = Some(response.clone());
            Ok(())
        }
    }

    let seen = Arc::new(Mutex::new(None));
    let before_reply = Arc::new(AtomicUsize::new(0));
    let after_reply = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureHandler { seen: seen.clone() }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: before_reply.clone(),
        }))
        .add_handler(Arc::new(ReplyHandler("first")))
        .add_handler(Arc::new(CountingHandler {
            handle_count: after_reply.clone(),
        }));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    let expected = HandlerResponse::Reply(vec![ReplyBlock::text("first")]);
    assert_eq!(result, expected);
    assert_eq!(before_reply.load(Ordering::SeqCst), 1);
    assert_eq!(after_reply.load(Ordering::SeqCst), 0);
    assert_eq!(*seen.lock().unwrap(), Some(expected));
}

/// **Test: before runs first→last, after runs last→first.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    struct OrderHandler {
        name: &'static str,
        order: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Handler for OrderHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            self.order.lock().unwrap().push(format!("handle_{}", self.name));
            Ok(HandlerResponse::Continue)
        }

        async fn after(
            &self,
            _message: &Message,
            _response: &HandlerResponse,
        ) -> dbot_core::Result<()> {
            self.order.lock().unwrap().push(format!("after_{}", self.name));
            Ok(())
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(
        *order.lock().unwrap(),
        vec![
            "before_first",
            "before_second",
            "handle_first",
            "handle_second",
            "after_second",
            "after_first"
        ]
    );
}

/// **Test: A handler error propagates out of the chain.**
#[tokio::test]
async fn test_handler_error_propagates() {
    struct FailingHandler;

    #[async_trait::async_trait]
    impl Handler for FailingHandler {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Err(dbot_core::DbotError::Bot("boom".to_string()))
        }
    }

    let chain = HandlerChain::new().add_handler(Arc::new(FailingHandler));
    let err = chain.handle(&create_test_message("x")).await.unwrap_err();
    assert!(err.to_string().contains("boom"));
}
