use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the storage root is usable, along with the queue backlog.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let node_id = state.node().id.clone();
    let pending = state.queue().pending_keys();

    match state.store().health_check().await {
        Ok(()) => HealthResponse::ok(node_id, pending),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded(node_id, pending)
        }
    }
}
