mod harness;

use harness::{get_request, send};
use serde_json::json;

#[tokio::test]
async fn success_passes_through() {
    let (status, body) = send(get_request("/users/1")).await;
    assert_eq!(status, 200);
    assert_eq!(body["display_name"], "Ada");
}

#[tokio::test]
async fn status_with_text_becomes_response() {
    let (status, body) = send(get_request("/users/0")).await;
    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({ "error": { "status": 400, "text": "id must be positive", "message": "id must be positive" } })
    );
}

#[tokio::test]
async fn message_with_options_keeps_message() {
    let (status, body) = send(get_request("/users/7")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["text"], "Not Found");
    assert_eq!(body["error"]["message"], "no user 7");
}

#[tokio::test]
async fn wrapped_cause_supplies_message() {
    let (status, body) = send(get_request("/io")).await;
    assert_eq!(status, 503);
    assert_eq!(body["error"]["text"], "Service Unavailable");
    assert_eq!(body["error"]["message"], "disk unavailable");
}

#[tokio::test]
async fn json_options_object_resolves_status_string() {
    let (status, body) = send(get_request("/legacy")).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["message"], "Conflict");
}
