use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::post,
};
use validator::Validate;

use crate::{
    dao::models::QuestionEntity,
    dto::{
        common::CommandResponse,
        question::{
            AddQuestionRequest, AssignPlayerRequest, DeleteQuestionRequest,
            DeleteQuestionResponse, UpdateQuestionRequest,
        },
    },
    error::AppError,
    services::question_service,
    state::SharedState,
};

/// Routes handling question mutations. Every mutation is serialized per match.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/matches/{id}/questions",
            post(add_question)
                .patch(update_question)
                .delete(delete_question),
        )
        .route("/matches/{id}/questions/assign", post(assign_player))
}

/// Add a question to a section.
#[utoipa::path(
    post,
    path = "/matches/{id}/questions",
    tag = "questions",
    params(("id" = String, Path, description = "Identifier of the match")),
    request_body = AddQuestionRequest,
    responses(
        (status = 200, description = "Question added", body = QuestionEntity),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn add_question(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<AddQuestionRequest>, JsonRejection>,
) -> Result<Json<CommandResponse<QuestionEntity>>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let question = question_service::add_question(&state, id, payload).await?;
    Ok(Json(CommandResponse::ok(question)))
}

/// Overwrite the fields of a question.
#[utoipa::path(
    patch,
    path = "/matches/{id}/questions",
    tag = "questions",
    params(("id" = String, Path, description = "Identifier of the match")),
    request_body = UpdateQuestionRequest,
    responses(
        (status = 200, description = "Question updated", body = QuestionEntity),
        (status = 404, description = "Unknown match or question")
    )
)]
pub async fn update_question(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateQuestionRequest>, JsonRejection>,
) -> Result<Json<CommandResponse<QuestionEntity>>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let question = question_service::update_question(&state, id, payload).await?;
    Ok(Json(CommandResponse::ok(question)))
}

/// Delete a question and its media file. Unknown coordinates are ignored.
#[utoipa::path(
    delete,
    path = "/matches/{id}/questions",
    tag = "questions",
    params(("id" = String, Path, description = "Identifier of the match")),
    request_body = DeleteQuestionRequest,
    responses(
        (status = 200, description = "Deletion outcome", body = DeleteQuestionResponse),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn delete_question(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<DeleteQuestionRequest>, JsonRejection>,
) -> Result<Json<CommandResponse<DeleteQuestionResponse>>, AppError> {
    let Json(payload) = payload?;
    let deleted = question_service::delete_question(&state, id, payload).await?;
    Ok(Json(CommandResponse::ok(DeleteQuestionResponse { deleted })))
}

/// Move a question to another contestant's slot.
#[utoipa::path(
    post,
    path = "/matches/{id}/questions/assign",
    tag = "questions",
    params(("id" = String, Path, description = "Identifier of the match")),
    request_body = AssignPlayerRequest,
    responses(
        (status = 200, description = "Question moved", body = QuestionEntity),
        (status = 400, description = "Unsupported section"),
        (status = 404, description = "Unknown match, slot or question")
    )
)]
pub async fn assign_player(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<AssignPlayerRequest>, JsonRejection>,
) -> Result<Json<CommandResponse<QuestionEntity>>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let question = question_service::assign_player(&state, id, payload).await?;
    Ok(Json(CommandResponse::ok(question)))
}
