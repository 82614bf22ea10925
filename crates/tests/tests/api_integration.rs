use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use mesero_api::build_app;
use serde_json::json;
use tower::ServiceExt;

const API_KEY: &str = "dev-mesero-key";

fn fulfill_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/fulfill")
        .header("content-type", "application/json")
        .header("x-api-key", API_KEY)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let app = build_app().await.expect("app should build");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn fulfill_requires_api_key() {
    let app = build_app().await.expect("app should build");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/fulfill")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "inputTranscript": "hola" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn every_event_yields_one_fulfilled_message() {
    let app = build_app().await.expect("app should build");

    let response = app
        .oneshot(fulfill_request(json!({
            "sessionState": { "intent": { "name": "ViewMenu", "slots": {} } },
            "inputTranscript": "muéstrame el menú"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = body_json(response).await;

    assert_eq!(parsed["sessionState"]["intent"]["state"], "Fulfilled");
    assert_eq!(parsed["sessionState"]["dialogAction"]["type"], "Close");
    assert_eq!(parsed["messages"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["messages"][0]["contentType"], "PlainText");
    assert!(parsed["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("Menú"));
}

#[tokio::test]
async fn malformed_event_still_gets_the_technical_error_envelope() {
    let app = build_app().await.expect("app should build");

    let response = app
        .oneshot(fulfill_request(json!({
            "sessionState": "definitely-not-an-object",
            "inputTranscript": 42
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = body_json(response).await;

    assert_eq!(parsed["sessionState"]["intent"]["name"], "FallbackIntent");
    assert_eq!(parsed["sessionState"]["intent"]["state"], "Fulfilled");
    assert_eq!(parsed["messages"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["messages"][0]["content"], "Error técnico.");
}

#[tokio::test]
async fn order_flow_end_to_end_with_a_slot() {
    let app = build_app().await.expect("app should build");

    let response = app
        .oneshot(fulfill_request(json!({
            "sessionState": {
                "intent": {
                    "name": "PlaceOrder",
                    "slots": {
                        "Comida": { "value": { "interpretedValue": "pizzas" } }
                    }
                }
            },
            "inputTranscript": "quiero pedir"
        })))
        .await
        .unwrap();

    let parsed = body_json(response).await;
    let content = parsed["messages"][0]["content"].as_str().unwrap();
    assert!(content.contains("Pizza"));
    assert!(content.contains("25.000"));
}
