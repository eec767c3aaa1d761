#![allow(dead_code)]

use std::sync::Arc;

use quiz_data_node::{
    dao::match_store::fs::FsMatchStore,
    dto::{
        matches::CreateMatchRequest,
        question::{AddQuestionRequest, MediaInput},
    },
    services::match_service,
    state::{AppState, NodeIdentity, SharedState, sections::SectionKind},
};
use tempfile::TempDir;

pub struct TestNode {
    pub dir: TempDir,
    pub state: SharedState,
}

pub async fn node() -> TestNode {
    let dir = tempfile::tempdir().unwrap();
    let store = FsMatchStore::open(dir.path()).await.unwrap();
    let state = AppState::new(
        Arc::new(store),
        NodeIdentity {
            id: "node-test".into(),
            name: Some("Node test".into()),
            public_host: "127.0.0.1".into(),
            port: 3000,
        },
    );
    TestNode { dir, state }
}

pub async fn create(node: &TestNode, match_id: &str) {
    match_service::create_match(
        &node.state,
        CreateMatchRequest {
            match_id: match_id.into(),
            name: "Trận bán kết".into(),
            code: "ABC123".into(),
            data_node_id: None,
            data_node_name: None,
            created_by: None,
        },
    )
    .await
    .unwrap();
}

pub fn add_request(section: SectionKind, player_index: Option<u8>, order: i64) -> AddQuestionRequest {
    AddQuestionRequest {
        section,
        player_index: Some(player_index),
        order,
        kind: "text".into(),
        question_text: Some(format!("Câu hỏi {order}")),
        answer: format!("Đáp án {order}"),
        points: None,
        time_limit: None,
        media: None,
    }
}

pub fn with_media(mut request: AddQuestionRequest, file_name: &str, size: u64) -> AddQuestionRequest {
    request.media = Some(MediaInput {
        file_name: file_name.into(),
        size: Some(size),
    });
    request
}

pub async fn write_media(node: &TestNode, match_id: &str, file_name: &str) {
    tokio::fs::write(node.dir.path().join(match_id).join(file_name), b"media bytes")
        .await
        .unwrap();
}

pub fn media_exists(node: &TestNode, match_id: &str, file_name: &str) -> bool {
    node.dir.path().join(match_id).join(file_name).exists()
}
