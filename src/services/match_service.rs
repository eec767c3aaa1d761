use tracing::{info, warn};

use crate::{
    dao::models::{MatchDocument, MatchSummaryEntity},
    dto::matches::{CreateMatchRequest, MatchSummary},
    error::ServiceError,
    state::{SharedState, document::new_match_document, statistics},
};

const DEFAULT_CREATOR: &str = "admin";

/// Persist the initial document of a match.
///
/// An existing document with the same id is replaced; the replacement is logged.
pub async fn create_match(
    state: &SharedState,
    request: CreateMatchRequest,
) -> Result<MatchDocument, ServiceError> {
    let CreateMatchRequest {
        match_id,
        name,
        code,
        data_node_id,
        data_node_name,
        created_by,
    } = request;

    let node = state.node();
    let document = new_match_document(
        &match_id,
        &name,
        &code,
        data_node_id.as_deref().unwrap_or(&node.id),
        data_node_name.as_deref().or(node.name.as_deref()),
        created_by.as_deref().unwrap_or(DEFAULT_CREATOR),
    );

    let store = state.store();
    let key = match_id.clone();
    state
        .queue()
        .enqueue(&key, move || async move {
            if store.exists(&match_id).await? {
                warn!(match_id = %match_id, "replacing existing match document");
            }
            store.create_folder(&match_id).await?;
            store.save(&match_id, document.clone()).await?;
            info!(match_id = %match_id, code = %document.info.code, "match created");
            Ok(document)
        })
        .await
}

/// Whether a document is stored for `match_id`.
pub async fn match_exists(state: &SharedState, match_id: &str) -> Result<bool, ServiceError> {
    Ok(state.store().exists(match_id).await?)
}

/// Full document of a match.
pub async fn get_match(state: &SharedState, match_id: &str) -> Result<MatchDocument, ServiceError> {
    Ok(state.store().load(match_id).await?)
}

/// Summaries of every stored match. Unreadable documents are skipped.
pub async fn list_matches(state: &SharedState) -> Result<Vec<MatchSummary>, ServiceError> {
    let store = state.store();
    let ids = store.list_ids().await?;

    let mut summaries: Vec<MatchSummary> = Vec::with_capacity(ids.len());
    for match_id in ids {
        match store.load(&match_id).await {
            Ok(document) => summaries.push(MatchSummaryEntity::from(document).into()),
            Err(err) => {
                warn!(match_id = %match_id, error = %err, "skipping unreadable match document");
            }
        }
    }

    Ok(summaries)
}

/// Overwrite the status of a match. Any transition is accepted.
pub async fn set_status(
    state: &SharedState,
    match_id: String,
    status: String,
) -> Result<MatchDocument, ServiceError> {
    let store = state.store();
    let key = match_id.clone();
    state
        .queue()
        .enqueue(&key, move || async move {
            let mut document = store.load(&match_id).await?;
            let previous = std::mem::replace(&mut document.info.status, status);
            statistics::refresh(&mut document)?;
            store.save(&match_id, document.clone()).await?;
            info!(
                match_id = %match_id,
                from = %previous,
                to = %document.info.status,
                "match status updated"
            );
            Ok(document)
        })
        .await
}

/// Remove a match folder with its document and media files.
///
/// Runs outside the mutation queue: a unit already queued for the same match fails with
/// `NotFound` when it tries to write back.
pub async fn delete_match(state: &SharedState, match_id: &str) -> Result<bool, ServiceError> {
    let deleted = state.store().delete_match(match_id).await?;
    if deleted {
        info!(match_id, "match deleted");
    } else {
        warn!(match_id, "delete requested for unknown match");
    }
    Ok(deleted)
}
