use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::future::BoxFuture;
use tokio::fs;
use tracing::{debug, warn};

use crate::dao::{
    match_store::MatchStore,
    models::MatchDocument,
    storage::{StorageError, StorageResult},
};

use super::paths::{
    DOCUMENT_FILE_NAME, document_path, match_dir, media_path, temp_document_path,
};

/// Match store keeping one folder per match under a storage root: the pretty-printed
/// `match.json` document next to the match's media files.
#[derive(Clone)]
pub struct FsMatchStore {
    root: Arc<Path>,
}

impl FsMatchStore {
    /// Open the store, creating the storage root when it does not exist yet.
    pub async fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root: PathBuf = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::io(&root, source))?;

        Ok(Self {
            root: Arc::from(root),
        })
    }

    /// Storage root this store operates on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_document(&self, match_id: &str) -> StorageResult<MatchDocument> {
        let path = document_path(&self.root, match_id)?;
        let contents = match fs::read(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    match_id: match_id.to_owned(),
                });
            }
            Err(source) => return Err(StorageError::io(path, source)),
        };

        serde_json::from_slice(&contents).map_err(|source| StorageError::Corrupt { path, source })
    }

    async fn write_document(&self, match_id: &str, document: &MatchDocument) -> StorageResult<()> {
        let path = document_path(&self.root, match_id)?;
        let temp_path = temp_document_path(&self.root, match_id)?;
        let contents =
            serde_json::to_vec_pretty(document).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?;

        // The folder is never recreated here, so a write racing a delete fails instead of
        // resurrecting the match.
        match fs::write(&temp_path, contents).await {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    match_id: match_id.to_owned(),
                });
            }
            Err(source) => return Err(StorageError::io(temp_path, source)),
        }

        fs::rename(&temp_path, &path)
            .await
            .map_err(|source| StorageError::io(path, source))?;

        debug!(match_id, "match document written");
        Ok(())
    }

    async fn scan_ids(&self) -> StorageResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|source| StorageError::io(&*self.root, source))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| StorageError::io(&*self.root, source))?
        {
            let is_dir = match entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !is_dir {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = %entry.path().display(), "skipping non UTF-8 match folder");
                continue;
            };

            match is_file(&entry.path().join(DOCUMENT_FILE_NAME)).await {
                Ok(true) => ids.push(name),
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        match_id = %name,
                        error = %err,
                        "skipping match folder with unreadable document"
                    );
                }
            }
        }

        ids.sort();
        Ok(ids)
    }
}

async fn is_file(path: &Path) -> StorageResult<bool> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StorageError::io(path, source)),
    }
}

impl MatchStore for FsMatchStore {
    fn create_folder(&self, match_id: &str) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let match_id = match_id.to_owned();
        Box::pin(async move {
            let dir = match_dir(&store.root, &match_id)?;
            fs::create_dir_all(&dir)
                .await
                .map_err(|source| StorageError::io(dir, source))
        })
    }

    fn exists(&self, match_id: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        let match_id = match_id.to_owned();
        Box::pin(async move { is_file(&document_path(&store.root, &match_id)?).await })
    }

    fn load(&self, match_id: &str) -> BoxFuture<'static, StorageResult<MatchDocument>> {
        let store = self.clone();
        let match_id = match_id.to_owned();
        Box::pin(async move { store.read_document(&match_id).await })
    }

    fn save(
        &self,
        match_id: &str,
        document: MatchDocument,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let match_id = match_id.to_owned();
        Box::pin(async move { store.write_document(&match_id, &document).await })
    }

    fn list_ids(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let store = self.clone();
        Box::pin(async move { store.scan_ids().await })
    }

    fn delete_match(&self, match_id: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        let match_id = match_id.to_owned();
        Box::pin(async move {
            let dir = match_dir(&store.root, &match_id)?;
            match fs::remove_dir_all(&dir).await {
                Ok(()) => Ok(true),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
                Err(source) => Err(StorageError::io(dir, source)),
            }
        })
    }

    fn remove_media(
        &self,
        match_id: &str,
        file_name: &str,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        let match_id = match_id.to_owned();
        let file_name = file_name.to_owned();
        Box::pin(async move {
            let path = media_path(&store.root, &match_id, &file_name)?;
            match fs::remove_file(&path).await {
                Ok(()) => Ok(true),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
                Err(source) => Err(StorageError::io(path, source)),
            }
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let metadata = fs::metadata(&store.root)
                .await
                .map_err(|source| StorageError::io(&*store.root, source))?;
            if metadata.is_dir() {
                Ok(())
            } else {
                Err(StorageError::io(
                    &*store.root,
                    std::io::Error::new(ErrorKind::NotADirectory, "storage root is not a folder"),
                ))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::document::new_match_document;
    use tempfile::tempdir;

    async fn store_with_match(match_id: &str) -> (tempfile::TempDir, FsMatchStore) {
        let dir = tempdir().unwrap();
        let store = FsMatchStore::open(dir.path()).await.unwrap();
        store.create_folder(match_id).await.unwrap();
        let document = new_match_document(match_id, "Trận 1", "ABC123", "node-a", None, "admin");
        store.save(match_id, document).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn load_missing_match_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FsMatchStore::open(dir.path()).await.unwrap();

        let err = store.load("nope").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { match_id } if match_id == "nope"));
        assert!(!store.exists("nope").await.unwrap());
    }

    #[tokio::test]
    async fn saved_document_round_trips_and_leaves_no_temp_file() {
        let (dir, store) = store_with_match("m1").await;

        let loaded = store.load("m1").await.unwrap();
        assert_eq!(loaded.info.id, "m1");
        assert!(store.exists("m1").await.unwrap());
        assert!(!dir.path().join("m1").join("match.json.tmp").exists());

        let text = std::fs::read_to_string(dir.path().join("m1").join("match.json")).unwrap();
        assert!(text.contains("\n  \"match\""), "document should be pretty-printed");
    }

    #[tokio::test]
    async fn save_does_not_recreate_a_deleted_match() {
        let (_dir, store) = store_with_match("m1").await;
        let document = store.load("m1").await.unwrap();

        assert!(store.delete_match("m1").await.unwrap());
        let err = store.save("m1", document).await.unwrap_err();

        assert!(matches!(err, StorageError::NotFound { .. }));
        assert!(!store.exists("m1").await.unwrap());
    }

    #[tokio::test]
    async fn list_ids_only_reports_folders_with_a_document() {
        let (dir, store) = store_with_match("m1").await;
        std::fs::create_dir(dir.path().join("empty-folder")).unwrap();
        std::fs::write(dir.path().join("stray.txt"), b"x").unwrap();

        assert_eq!(store.list_ids().await.unwrap(), vec!["m1".to_owned()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn list_ids_skips_folders_whose_document_cannot_be_inspected() {
        let (dir, store) = store_with_match("m1").await;
        let looping = dir.path().join("looping");
        std::fs::create_dir(&looping).unwrap();
        std::os::unix::fs::symlink("match.json", looping.join("match.json")).unwrap();

        assert!(is_file(&looping.join("match.json")).await.is_err());
        assert_eq!(store.list_ids().await.unwrap(), vec!["m1".to_owned()]);
    }

    #[tokio::test]
    async fn corrupt_document_is_reported() {
        let (dir, store) = store_with_match("m1").await;
        std::fs::write(dir.path().join("m1").join("match.json"), b"{ not json").unwrap();

        assert!(matches!(
            store.load("m1").await.unwrap_err(),
            StorageError::Corrupt { .. }
        ));
        assert!(store.exists("m1").await.unwrap());
    }

    #[tokio::test]
    async fn remove_media_is_idempotent() {
        let (dir, store) = store_with_match("m1").await;
        std::fs::write(dir.path().join("m1").join("clip.mp4"), b"bytes").unwrap();

        assert!(store.remove_media("m1", "clip.mp4").await.unwrap());
        assert!(!store.remove_media("m1", "clip.mp4").await.unwrap());
        assert!(matches!(
            store.remove_media("m1", "../m1/match.json").await.unwrap_err(),
            StorageError::InvalidName { .. }
        ));
    }

    #[tokio::test]
    async fn delete_match_reports_whether_anything_existed() {
        let (dir, store) = store_with_match("m1").await;
        std::fs::write(dir.path().join("m1").join("clip.mp4"), b"bytes").unwrap();

        assert!(store.delete_match("m1").await.unwrap());
        assert!(!dir.path().join("m1").exists());
        assert!(!store.delete_match("m1").await.unwrap());
    }
}
