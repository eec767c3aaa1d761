pub mod fs;

use crate::dao::models::MatchDocument;
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for match documents and their media files.
///
/// Implementations are not self-synchronizing: `save` must only be called from a unit of work
/// serialized by the mutation queue for the same match id.
pub trait MatchStore: Send + Sync {
    /// Create the storage folder of a match if it does not exist yet.
    fn create_folder(&self, match_id: &str) -> BoxFuture<'static, StorageResult<()>>;
    /// Whether a document is stored for the match, without parsing it.
    fn exists(&self, match_id: &str) -> BoxFuture<'static, StorageResult<bool>>;
    /// Load and decode the document of a match.
    fn load(&self, match_id: &str) -> BoxFuture<'static, StorageResult<MatchDocument>>;
    /// Replace the stored document of a match.
    fn save(
        &self,
        match_id: &str,
        document: MatchDocument,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Identifiers of every match folder holding a document.
    fn list_ids(&self) -> BoxFuture<'static, StorageResult<Vec<String>>>;
    /// Remove a match folder with all its files. Returns `false` if nothing existed.
    fn delete_match(&self, match_id: &str) -> BoxFuture<'static, StorageResult<bool>>;
    /// Remove a media file of a match. Returns `false` if the file was already gone.
    fn remove_media(
        &self,
        match_id: &str,
        file_name: &str,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    /// Check that the storage backend is usable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
