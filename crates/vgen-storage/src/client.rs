//! Local filesystem upload storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use metrics::histogram;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use vgen_models::VideoId;

use crate::error::{StorageError, StorageResult};

/// Extension used when the uploaded filename has none.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Name under which a job's source image is stored: `<id>.<ext>`.
///
/// The extension is whatever follows the last `.` of the original name.
/// Names without one, or whose extension is not plain alphanumeric, get
/// [`DEFAULT_EXTENSION`].
pub fn upload_filename(id: &VideoId, original: Option<&str>) -> String {
    let ext = original
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(DEFAULT_EXTENSION);

    format!("{}.{}", id, ext)
}

/// Write-once file storage rooted at a local directory.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    /// Open storage at `root`, creating the directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::config_error(format!("cannot create {}: {}", root.display(), e))
        })?;

        info!("Upload storage at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a stored name to its path, rejecting anything that could
    /// escape the storage root.
    pub fn path_for(&self, filename: &str) -> StorageResult<PathBuf> {
        let valid = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\'])
            && !filename.contains('\0');

        if !valid {
            return Err(StorageError::invalid_key(filename));
        }
        Ok(self.root.join(filename))
    }

    /// Store bytes under `filename`. Fails if the name is already taken.
    pub async fn upload_bytes(&self, filename: &str, data: &[u8]) -> StorageResult<PathBuf> {
        let path = self.path_for(filename)?;
        let start = Instant::now();
        debug!("Uploading {} bytes to {}", data.len(), path.display());

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(filename.to_string()),
                _ => StorageError::upload_failed(e.to_string()),
            })?;

        file.write_all(data)
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        histogram!("vgen_upload_duration_seconds").record(start.elapsed().as_secs_f64());
        info!("Stored upload {} ({} bytes)", filename, data.len());
        Ok(path)
    }

    /// Delete a stored file. Used to undo an upload whose job was never recorded.
    pub async fn remove(&self, filename: &str) -> StorageResult<()> {
        let path = self.path_for(filename)?;
        tokio::fs::remove_file(&path).await?;
        debug!("Removed upload {}", filename);
        Ok(())
    }

    /// Verify the storage root is still a writable directory.
    pub async fn check_connectivity(&self) -> StorageResult<()> {
        let meta = tokio::fs::metadata(&self.root).await?;
        if !meta.is_dir() {
            return Err(StorageError::config_error(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        if meta.permissions().readonly() {
            return Err(StorageError::config_error(format!(
                "{} is read-only",
                self.root.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_filename_keeps_extension() {
        let id = VideoId::from("abc");
        assert_eq!(upload_filename(&id, Some("face.png")), "abc.png");
        assert_eq!(upload_filename(&id, Some("archive.tar.gz")), "abc.gz");
    }

    #[test]
    fn test_upload_filename_defaults_to_jpg() {
        let id = VideoId::from("abc");
        assert_eq!(upload_filename(&id, Some("face")), "abc.jpg");
        assert_eq!(upload_filename(&id, Some("face.")), "abc.jpg");
        assert_eq!(upload_filename(&id, None), "abc.jpg");
    }

    #[test]
    fn test_upload_filename_rejects_path_in_extension() {
        let id = VideoId::from("abc");
        assert_eq!(upload_filename(&id, Some("x./../../etc/passwd")), "abc.jpg");
    }

    #[tokio::test]
    async fn test_upload_is_write_once() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path().join("uploads")).await.unwrap();

        let path = storage.upload_bytes("abc.png", b"first").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"first");

        let err = storage.upload_bytes("abc.png", b"second").await.unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_remove_frees_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path()).await.unwrap();

        let path = storage.upload_bytes("abc.png", b"first").await.unwrap();
        tokio_test::assert_ok!(storage.remove("abc.png").await);
        assert!(!path.exists());

        storage.upload_bytes("abc.png", b"again").await.unwrap();
        assert!(matches!(
            storage.remove("../abc.png").await,
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path()).await.unwrap();

        for name in ["", "..", "../x.png", "a/b.png", "a\\b.png"] {
            assert!(matches!(
                storage.upload_bytes(name, b"x").await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_connectivity() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path()).await.unwrap();
        tokio_test::assert_ok!(storage.check_connectivity().await);
    }
}
