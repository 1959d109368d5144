// ABOUTME: Telegram transport tests against a mocked Bot API
// ABOUTME: Covers backlog skipping, offsets, replying to commands and ignoring plain chat

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use taskbot_bot::{messages, FrontEnd, TaskClient, TelegramTransport, TransportError};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123:abc";

fn transport_for(server: &MockServer) -> Arc<TelegramTransport> {
    // The store is never reached by the commands used here
    let store = Url::parse("http://127.0.0.1:1/tasks/").unwrap();
    let front_end = Arc::new(FrontEnd::with_api(Arc::new(TaskClient::new(store))));
    Arc::new(TelegramTransport::new(
        Url::parse(&server.uri()).unwrap(),
        TOKEN,
        front_end,
    ))
}

fn text_update(update_id: i64, chat_id: i64, text: &str) -> serde_json::Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id * 10,
            "chat": {"id": chat_id, "type": "private"},
            "text": text,
        }
    })
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": result}))
}

#[tokio::test]
async fn test_poll_replies_to_commands_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ok(json!([
            text_update(11, 500, "/start"),
            text_update(12, 500, "hello"),
            {"update_id": 13},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .and(body_partial_json(json!({
            "chat_id": 500,
            "text": messages::WELCOME,
            "reply_to_message_id": 110,
        })))
        .respond_with(ok(json!({"message_id": 900, "chat": {"id": 500}})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let (next, handles) = transport.poll_once(None, 0).await.unwrap();

    assert_eq!(next, Some(14));
    assert_eq!(handles.len(), 2);
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_malformed_update_is_skipped_and_offset_advances() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ok(json!([
            {"update_id": 21, "message": {"message_id": "x", "chat": "not a chat"}},
            text_update(22, 700, "/help"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .and(body_partial_json(json!({"chat_id": 700, "text": messages::HELP})))
        .respond_with(ok(json!({"message_id": 901, "chat": {"id": 700}})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let (next, handles) = transport.poll_once(Some(21), 0).await.unwrap();

    assert_eq!(next, Some(23));
    assert_eq!(handles.len(), 1);
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_backlog_skip_counts_malformed_updates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .and(body_partial_json(json!({"offset": 31})))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ok(json!([{"update_id": 30, "message": 5}])))
        .expect(1)
        .mount(&server)
        .await;

    let next = transport_for(&server).skip_pending_updates().await.unwrap();

    assert_eq!(next, Some(31));
}

#[tokio::test]
async fn test_poll_keeps_offset_when_nothing_arrives() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .and(body_partial_json(json!({"offset": 7})))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (next, handles) = transport_for(&server).poll_once(Some(7), 0).await.unwrap();

    assert_eq!(next, Some(7));
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_skip_pending_updates_confirms_backlog() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .and(body_partial_json(json!({"offset": 7})))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ok(json!([
            text_update(5, 1, "/list"),
            text_update(6, 1, "/help"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let next = transport_for(&server).skip_pending_updates().await.unwrap();

    assert_eq!(next, Some(7));
}

#[tokio::test]
async fn test_skip_pending_updates_with_empty_backlog() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let next = transport_for(&server).skip_pending_updates().await.unwrap();

    assert_eq!(next, None);
}

#[tokio::test]
async fn test_api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized",
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server).get_updates(None, 0).await.unwrap_err();

    match err {
        TransportError::Api(description) => assert_eq!(description, "Unauthorized"),
        other => panic!("expected an API error, got {:?}", other),
    }
}
