pub mod document;
pub mod queue;
pub mod sections;
pub mod statistics;

use std::sync::Arc;

use crate::dao::match_store::MatchStore;

pub use self::queue::MutationQueue;

pub type SharedState = Arc<AppState>;

/// How this data node identifies itself and where its media can be streamed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    /// Identifier recorded as the owner of matches created without an explicit owner.
    pub id: String,
    /// Human readable node name.
    pub name: Option<String>,
    /// Host the streaming endpoint is reachable at.
    pub public_host: String,
    /// Port the streaming endpoint is reachable at.
    pub port: u16,
}

impl NodeIdentity {
    /// Stream address of a media file stored in a match folder.
    pub fn stream_url(&self, match_id: &str, file_name: &str) -> String {
        format!(
            "http://{}:{}/stream/{}/{}",
            self.public_host, self.port, match_id, file_name
        )
    }
}

/// Central application state: the match store, the per-match mutation queue and the node
/// identity.
pub struct AppState {
    store: Arc<dyn MatchStore>,
    queue: MutationQueue,
    node: NodeIdentity,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The mutation queue starts empty and lives exactly as long as the state.
    pub fn new(store: Arc<dyn MatchStore>, node: NodeIdentity) -> SharedState {
        Arc::new(Self {
            store,
            queue: MutationQueue::new(),
            node,
        })
    }

    /// Handle to the match store.
    pub fn store(&self) -> Arc<dyn MatchStore> {
        Arc::clone(&self.store)
    }

    /// Queue serializing mutations per match id.
    pub fn queue(&self) -> &MutationQueue {
        &self.queue
    }

    /// Identity of this data node.
    pub fn node(&self) -> &NodeIdentity {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_url_composes_node_address_and_relative_path() {
        let node = NodeIdentity {
            id: "node-a".into(),
            name: None,
            public_host: "192.168.1.20".into(),
            port: 3000,
        };

        assert_eq!(
            node.stream_url("m1", "khoi_dong_rieng_1.mp4"),
            "http://192.168.1.20:3000/stream/m1/khoi_dong_rieng_1.mp4"
        );
    }
}
