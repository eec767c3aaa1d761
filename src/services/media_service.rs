use tracing::{debug, info};

use crate::{dao::match_store::MatchStore, error::ServiceError};

/// Delete a media file from a match folder.
///
/// A file that is already gone counts as removed. Called from inside queued mutations, before
/// the mutated document is written back.
pub async fn remove_file(
    store: &dyn MatchStore,
    match_id: &str,
    file_name: &str,
) -> Result<(), ServiceError> {
    if store.remove_media(match_id, file_name).await? {
        info!(match_id, file_name, "media file removed");
    } else {
        debug!(match_id, file_name, "media file already absent");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::match_store::fs::FsMatchStore;

    #[tokio::test]
    async fn removing_a_missing_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMatchStore::open(dir.path()).await.unwrap();
        store.create_folder("m1").await.unwrap();
        tokio::fs::write(dir.path().join("m1").join("clip.mp4"), b"bytes")
            .await
            .unwrap();

        remove_file(&store, "m1", "clip.mp4").await.unwrap();
        remove_file(&store, "m1", "clip.mp4").await.unwrap();

        assert!(!dir.path().join("m1").join("clip.mp4").exists());
    }

    #[tokio::test]
    async fn path_like_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMatchStore::open(dir.path()).await.unwrap();

        let err = remove_file(&store, "m1", "../m2/match.json")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
