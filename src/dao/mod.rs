/// Match document persistence and media file storage.
pub mod match_store;
/// Persisted document model definitions.
pub mod models;
/// Storage error types shared by the store implementations.
pub mod storage;
