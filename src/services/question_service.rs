use tracing::{info, warn};

use crate::{
    dao::models::{DEFAULT_QUESTION_POINTS, QuestionEntity},
    dto::question::{
        AddQuestionRequest, AssignPlayerRequest, DeleteQuestionRequest, MediaInput,
        UpdateQuestionRequest,
    },
    error::ServiceError,
    services::media_service,
    state::{
        NodeIdentity, SharedState,
        sections::{SectionKind, find_question_mut, insert_ordered, sort_questions, take_question},
        statistics,
    },
};

/// Append a question to a section (or a player slot of it) and return it.
pub async fn add_question(
    state: &SharedState,
    match_id: String,
    request: AddQuestionRequest,
) -> Result<QuestionEntity, ServiceError> {
    let store = state.store();
    let node = state.node().clone();
    let key = match_id.clone();
    state
        .queue()
        .enqueue(&key, move || async move {
            let mut document = store.load(&match_id).await?;

            let section = request.section;
            let player_index = request.player_index.flatten();
            let question = build_question(&node, &match_id, request);

            let list = document.sections.list_or_insert(section, player_index);
            insert_ordered(list, question.clone());

            statistics::refresh(&mut document)?;
            store.save(&match_id, document).await?;
            info!(
                match_id = %match_id,
                section = %section,
                player_index = ?player_index,
                order = question.order,
                "question added"
            );
            Ok(question)
        })
        .await
}

/// Remove a question and its media file.
///
/// Returns `false` without writing anything when no question matches the coordinates.
pub async fn delete_question(
    state: &SharedState,
    match_id: String,
    request: DeleteQuestionRequest,
) -> Result<bool, ServiceError> {
    let store = state.store();
    let key = match_id.clone();
    state
        .queue()
        .enqueue(&key, move || async move {
            let mut document = store.load(&match_id).await?;

            let DeleteQuestionRequest {
                section,
                player_index,
                order,
            } = request;
            let player_index = player_index.flatten();

            let Some(list) = document.sections.list_mut(section, player_index) else {
                warn!(
                    match_id = %match_id,
                    section = %section,
                    player_index = ?player_index,
                    "delete ignored: player slot not found"
                );
                return Ok(false);
            };
            let Some(position) = list.iter().position(|question| question.order == order) else {
                warn!(
                    match_id = %match_id,
                    section = %section,
                    player_index = ?player_index,
                    order,
                    "delete ignored: question not found"
                );
                return Ok(false);
            };

            if let Some(file_name) = list[position].media_file.as_deref() {
                media_service::remove_file(store.as_ref(), &match_id, file_name).await?;
            }
            list.remove(position);

            statistics::refresh(&mut document)?;
            store.save(&match_id, document).await?;
            info!(
                match_id = %match_id,
                section = %section,
                player_index = ?player_index,
                order,
                "question deleted"
            );
            Ok(true)
        })
        .await
}

/// Move a question to another contestant's slot of the same section.
pub async fn assign_player(
    state: &SharedState,
    match_id: String,
    request: AssignPlayerRequest,
) -> Result<QuestionEntity, ServiceError> {
    let AssignPlayerRequest {
        section,
        current_player_index,
        order,
        new_player_index,
    } = request;

    if !section.is_partitioned() {
        return Err(unsupported_section(section));
    }

    let store = state.store();
    let key = match_id.clone();
    state
        .queue()
        .enqueue(&key, move || async move {
            let mut document = store.load(&match_id).await?;
            let current = current_player_index.flatten();

            let partitioned = document
                .sections
                .partitioned_mut(section)
                .ok_or_else(|| unsupported_section(section))?;
            let slot = partitioned.slot_mut(current).ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "player slot {} not found in section `{section}`",
                    describe_slot(current)
                ))
            })?;
            let question = take_question(&mut slot.questions, order)
                .ok_or_else(|| question_not_found(section, current, order))?;

            let destination = partitioned.slot_or_insert(Some(new_player_index));
            insert_ordered(&mut destination.questions, question.clone());

            statistics::refresh(&mut document)?;
            store.save(&match_id, document).await?;
            info!(
                match_id = %match_id,
                section = %section,
                from = ?current,
                to = new_player_index,
                order,
                "question reassigned"
            );
            Ok(question)
        })
        .await
}

/// Overwrite the fields of a question present in the request.
///
/// Replacing or clearing the media reference deletes the previous file.
pub async fn update_question(
    state: &SharedState,
    match_id: String,
    request: UpdateQuestionRequest,
) -> Result<QuestionEntity, ServiceError> {
    let store = state.store();
    let node = state.node().clone();
    let key = match_id.clone();
    state
        .queue()
        .enqueue(&key, move || async move {
            let mut document = store.load(&match_id).await?;

            let UpdateQuestionRequest {
                section,
                player_index,
                order,
                new_order,
                kind,
                question_text,
                answer,
                points,
                time_limit,
                media,
            } = request;
            let player_index = player_index.flatten();

            let list = document
                .sections
                .list_mut(section, player_index)
                .ok_or_else(|| question_not_found(section, player_index, order))?;
            let question = find_question_mut(list, order)
                .ok_or_else(|| question_not_found(section, player_index, order))?;

            if let Some(kind) = kind {
                question.kind = kind;
            }
            if let Some(question_text) = question_text {
                question.question_text = question_text;
            }
            if let Some(answer) = answer {
                question.answer = answer;
            }
            if let Some(points) = points {
                question.points = points;
            }
            if let Some(time_limit) = time_limit {
                question.time_limit = time_limit;
            }

            let mut replaced_file = None;
            if let Some(media) = media {
                let previous = question.media_file.take();
                attach_media(question, &node, &match_id, media);
                if previous.is_some() && previous != question.media_file {
                    replaced_file = previous;
                }
            }

            let reordered = new_order.is_some_and(|new_order| new_order != question.order);
            if let Some(new_order) = new_order {
                question.order = new_order;
            }
            let updated = question.clone();
            if reordered {
                sort_questions(list);
            }

            statistics::refresh(&mut document)?;
            if let Some(file_name) = replaced_file {
                media_service::remove_file(store.as_ref(), &match_id, &file_name).await?;
            }
            store.save(&match_id, document).await?;
            info!(
                match_id = %match_id,
                section = %section,
                player_index = ?player_index,
                order = updated.order,
                "question updated"
            );
            Ok(updated)
        })
        .await
}

fn build_question(node: &NodeIdentity, match_id: &str, request: AddQuestionRequest) -> QuestionEntity {
    let mut question = QuestionEntity {
        order: request.order,
        kind: request.kind,
        question_text: request.question_text,
        answer: request.answer,
        points: request.points.unwrap_or(DEFAULT_QUESTION_POINTS),
        time_limit: request.time_limit,
        media_file: None,
        media_url: None,
        media_size: None,
    };
    attach_media(&mut question, node, match_id, request.media);
    question
}

fn attach_media(
    question: &mut QuestionEntity,
    node: &NodeIdentity,
    match_id: &str,
    media: Option<MediaInput>,
) {
    match media {
        Some(MediaInput { file_name, size }) => {
            question.media_url = Some(node.stream_url(match_id, &file_name));
            question.media_file = Some(file_name);
            question.media_size = size;
        }
        None => {
            question.media_file = None;
            question.media_url = None;
            question.media_size = None;
        }
    }
}

fn unsupported_section(section: SectionKind) -> ServiceError {
    ServiceError::InvalidInput(format!(
        "unsupported section `{section}`: players can only be assigned in khoi_dong_rieng and ve_dich"
    ))
}

fn question_not_found(section: SectionKind, player_index: Option<u8>, order: i64) -> ServiceError {
    if section.is_partitioned() {
        ServiceError::NotFound(format!(
            "question {order} not found in section `{section}`, player slot {}",
            describe_slot(player_index)
        ))
    } else {
        ServiceError::NotFound(format!("question {order} not found in section `{section}`"))
    }
}

fn describe_slot(player_index: Option<u8>) -> String {
    player_index.map_or_else(|| "unassigned".to_owned(), |index| index.to_string())
}
