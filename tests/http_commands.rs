mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use quiz_data_node::routes;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::node;

async fn send(app: axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn commands_answer_with_the_success_envelope() {
    let node = node().await;
    let app = routes::router(node.state.clone());

    let (status, created) = send(
        app.clone(),
        Method::POST,
        "/matches",
        Some(json!({"match_id": "m1", "name": "Trận 1", "code": "ABC123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["match"]["status"], "draft");
    assert!(created.get("error").is_none());

    let (status, added) = send(
        app.clone(),
        Method::POST,
        "/matches/m1/questions",
        Some(json!({
            "section": "khoi_dong_rieng",
            "player_index": 1,
            "order": 1,
            "type": "text",
            "answer": "Hà Nội"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["data"]["points"], 10);

    let (_, listed) = send(app.clone(), Method::GET, "/matches", None).await;
    assert_eq!(listed["data"][0]["id"], "m1");
    assert_eq!(listed["data"][0]["total_questions"], 1);

    let (_, exists) = send(app.clone(), Method::GET, "/matches/m1/exists", None).await;
    assert_eq!(exists["data"]["exists"], true);

    let (_, deleted) = send(app.clone(), Method::DELETE, "/matches/m1", None).await;
    assert_eq!(deleted["data"]["deleted"], true);

    let (_, exists) = send(app, Method::GET, "/matches/m1/exists", None).await;
    assert_eq!(exists["data"]["exists"], false);
}

#[tokio::test]
async fn failures_answer_with_the_error_envelope() {
    let node = node().await;
    let app = routes::router(node.state.clone());

    let (status, missing) = send(app.clone(), Method::GET, "/matches/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["success"], false);
    assert!(missing["error"].as_str().unwrap().contains("ghost"));
    assert!(missing.get("data").is_none());

    send(
        app.clone(),
        Method::POST,
        "/matches",
        Some(json!({"match_id": "m1", "name": "Trận 1", "code": "ABC123"})),
    )
    .await;
    let (status, unsupported) = send(
        app.clone(),
        Method::POST,
        "/matches/m1/questions/assign",
        Some(json!({"section": "vcnv", "order": 1, "new_player_index": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        unsupported["error"]
            .as_str()
            .unwrap()
            .contains("unsupported section")
    );

    let (status, invalid) = send(
        app,
        Method::POST,
        "/matches",
        Some(json!({"match_id": "../etc", "name": "x", "code": "y"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid["success"], false);
}

#[tokio::test]
async fn healthcheck_reports_node_and_backlog() {
    let node = node().await;
    let app = routes::router(node.state.clone());

    let (status, health) = send(app, Method::GET, "/healthcheck", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["node_id"], "node-test");
    assert_eq!(health["pending_mutations"], 0);
}

#[tokio::test]
async fn malformed_bodies_answer_with_the_error_envelope() {
    let node = node().await;
    let app = routes::router(node.state.clone());
    send(
        app.clone(),
        Method::POST,
        "/matches",
        Some(json!({"match_id": "m1", "name": "Trận 1", "code": "ABC123"})),
    )
    .await;

    let bodies = [
        json!({"section": "bonus_round", "order": 1, "type": "text", "answer": "x"}),
        json!({"section": "vcnv", "player_index": 300, "order": 1, "type": "text", "answer": "x"}),
        json!({"section": "vcnv", "type": "text", "answer": "x"}),
    ];
    for body in bodies {
        let (status, rejected) =
            send(app.clone(), Method::POST, "/matches/m1/questions", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(rejected["success"], false);
        assert!(rejected["error"].as_str().unwrap().starts_with("bad request"));
    }

    let (status, oversized) = send(
        app.clone(),
        Method::POST,
        "/matches/m1/questions",
        Some(json!({
            "section": "vcnv",
            "order": 1,
            "type": "video",
            "answer": "x",
            "media": {"file_name": "clip.mp4", "size": u64::MAX}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(oversized["success"], false);

    let (_, document) = send(app, Method::GET, "/matches/m1", None).await;
    assert_eq!(document["data"]["statistics"]["total_questions"], 0);
}
