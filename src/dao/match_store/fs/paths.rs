use std::path::{Path, PathBuf};

use crate::dao::storage::{StorageError, StorageResult};

pub const DOCUMENT_FILE_NAME: &str = "match.json";
pub const TEMP_SUFFIX: &str = ".tmp";

/// Accept only names that resolve to a direct child of their parent folder.
pub fn checked_component(name: &str) -> StorageResult<&str> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::InvalidName {
            name: name.to_owned(),
        });
    }

    Ok(name)
}

pub fn match_dir(root: &Path, match_id: &str) -> StorageResult<PathBuf> {
    Ok(root.join(checked_component(match_id)?))
}

pub fn document_path(root: &Path, match_id: &str) -> StorageResult<PathBuf> {
    Ok(match_dir(root, match_id)?.join(DOCUMENT_FILE_NAME))
}

pub fn temp_document_path(root: &Path, match_id: &str) -> StorageResult<PathBuf> {
    Ok(match_dir(root, match_id)?.join(format!("{DOCUMENT_FILE_NAME}{TEMP_SUFFIX}")))
}

pub fn media_path(root: &Path, match_id: &str, file_name: &str) -> StorageResult<PathBuf> {
    Ok(match_dir(root, match_id)?.join(checked_component(file_name)?))
}
