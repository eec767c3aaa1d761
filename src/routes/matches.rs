use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, put},
};
use validator::Validate;

use crate::{
    dao::models::MatchDocument,
    dto::{
        common::CommandResponse,
        matches::{
            CreateMatchRequest, DeleteMatchResponse, ExistsResponse, MatchSummary,
            StatusResponse, UpdateStatusRequest,
        },
    },
    error::AppError,
    services::match_service,
    state::SharedState,
};

/// Routes handling the match lifecycle.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches", get(list_matches).post(create_match))
        .route("/matches/{id}", get(get_match).delete(delete_match))
        .route("/matches/{id}/exists", get(match_exists))
        .route("/matches/{id}/status", put(update_status))
}

/// Create a match with empty sections. An existing match with the same id is replaced.
#[utoipa::path(
    post,
    path = "/matches",
    tag = "matches",
    request_body = CreateMatchRequest,
    responses(
        (status = 200, description = "Match created", body = MatchDocument),
        (status = 400, description = "Invalid payload"),
        (status = 503, description = "Storage failure")
    )
)]
pub async fn create_match(
    State(state): State<SharedState>,
    payload: Result<Json<CreateMatchRequest>, JsonRejection>,
) -> Result<Json<CommandResponse<MatchDocument>>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let document = match_service::create_match(&state, payload).await?;
    Ok(Json(CommandResponse::ok(document)))
}

/// List every stored match. Unreadable documents are left out.
#[utoipa::path(
    get,
    path = "/matches",
    tag = "matches",
    responses(
        (status = 200, description = "Stored matches", body = [MatchSummary])
    )
)]
pub async fn list_matches(
    State(state): State<SharedState>,
) -> Result<Json<CommandResponse<Vec<MatchSummary>>>, AppError> {
    let summaries = match_service::list_matches(&state).await?;
    Ok(Json(CommandResponse::ok(summaries)))
}

/// Return the full document of a match.
#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Match document", body = MatchDocument),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn get_match(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse<MatchDocument>>, AppError> {
    let document = match_service::get_match(&state, &id).await?;
    Ok(Json(CommandResponse::ok(document)))
}

/// Check whether a match is stored on this node.
#[utoipa::path(
    get,
    path = "/matches/{id}/exists",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Existence flag", body = ExistsResponse)
    )
)]
pub async fn match_exists(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse<ExistsResponse>>, AppError> {
    let exists = match_service::match_exists(&state, &id).await?;
    Ok(Json(CommandResponse::ok(ExistsResponse { exists })))
}

/// Delete a match with its document and media files.
#[utoipa::path(
    delete,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Deletion outcome", body = DeleteMatchResponse)
    )
)]
pub async fn delete_match(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse<DeleteMatchResponse>>, AppError> {
    let deleted = match_service::delete_match(&state, &id).await?;
    Ok(Json(CommandResponse::ok(DeleteMatchResponse { deleted })))
}

/// Overwrite the status of a match.
#[utoipa::path(
    put,
    path = "/matches/{id}/status",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = StatusResponse),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn update_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<CommandResponse<StatusResponse>>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let document = match_service::set_status(&state, id, payload.status).await?;
    Ok(Json(CommandResponse::ok(StatusResponse {
        id: document.info.id,
        status: document.info.status,
    })))
}
