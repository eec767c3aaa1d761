/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Match lifecycle: creation, status, listing and deletion.
pub mod match_service;
/// Removal of media files owned by questions.
pub mod media_service;
/// Queued question mutations.
pub mod question_service;
