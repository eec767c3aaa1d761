use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Identifier of this data node.
    pub node_id: String,
    /// Number of matches with a mutation in flight.
    pub pending_mutations: usize,
}

impl HealthResponse {
    /// Create a health response indicating the storage root is usable.
    pub fn ok(node_id: String, pending_mutations: usize) -> Self {
        Self {
            status: "ok".to_string(),
            node_id,
            pending_mutations,
        }
    }

    /// Create a health response indicating the storage root is not usable.
    pub fn degraded(node_id: String, pending_mutations: usize) -> Self {
        Self {
            status: "degraded".to_string(),
            node_id,
            pending_mutations,
        }
    }
}
