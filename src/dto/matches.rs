//! DTO definitions for match lifecycle commands.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dao::models::MatchSummaryEntity,
    dto::{format_timestamp, validation::validate_storage_name},
};

/// Payload creating (or recreating) a match on this node.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateMatchRequest {
    /// Identifier assigned by the orchestrator; becomes the storage folder name.
    #[validate(custom(function = "validate_storage_name"))]
    pub match_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
    /// Owning node identifier; defaults to this node.
    #[serde(default)]
    pub data_node_id: Option<String>,
    /// Owning node name; defaults to this node's configured name.
    #[serde(default)]
    pub data_node_name: Option<String>,
    /// Identity of the creator; defaults to `admin`.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Payload overwriting the opaque status of a match.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Projection of a match returned by the storage scan.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchSummary {
    pub id: String,
    pub code: String,
    pub name: String,
    pub status: String,
    pub created_at: String,
    pub total_questions: u64,
    pub total_media_files: u64,
    pub total_size_bytes: u64,
}

impl From<MatchSummaryEntity> for MatchSummary {
    fn from(entity: MatchSummaryEntity) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            status: entity.status,
            created_at: format_timestamp(entity.created_at),
            total_questions: entity.total_questions,
            total_media_files: entity.total_media_files,
            total_size_bytes: entity.total_size_bytes,
        }
    }
}

/// Answer of the existence check.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Answer of a match deletion; `deleted` is false when nothing was stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteMatchResponse {
    pub deleted: bool,
}

/// Acknowledgement of a status update.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub id: String,
    pub status: String,
}
