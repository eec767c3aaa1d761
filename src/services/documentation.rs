use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the quiz data node.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::matches::create_match,
        crate::routes::matches::list_matches,
        crate::routes::matches::get_match,
        crate::routes::matches::match_exists,
        crate::routes::matches::delete_match,
        crate::routes::matches::update_status,
        crate::routes::questions::add_question,
        crate::routes::questions::update_question,
        crate::routes::questions::delete_question,
        crate::routes::questions::assign_player,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::matches::CreateMatchRequest,
            crate::dto::matches::UpdateStatusRequest,
            crate::dto::matches::MatchSummary,
            crate::dto::matches::ExistsResponse,
            crate::dto::matches::DeleteMatchResponse,
            crate::dto::matches::StatusResponse,
            crate::dto::question::MediaInput,
            crate::dto::question::AddQuestionRequest,
            crate::dto::question::UpdateQuestionRequest,
            crate::dto::question::DeleteQuestionRequest,
            crate::dto::question::DeleteQuestionResponse,
            crate::dto::question::AssignPlayerRequest,
            crate::dao::models::MatchDocument,
            crate::dao::models::QuestionEntity,
            crate::state::sections::SectionKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "matches", description = "Match lifecycle commands"),
        (name = "questions", description = "Question mutations, serialized per match"),
    )
)]
pub struct ApiDoc;
