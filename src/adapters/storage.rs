use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.full_path(path))
            .await
            .unwrap_or(false)
    }

    fn location(&self, path: &str) -> String {
        self.full_path(path).display().to_string()
    }
}

/// `activities.json` → `activities.backup.<timestamp>.json`, same directory.
pub fn backup_path(path: &str, timestamp: i64) -> String {
    Path::new(path)
        .with_extension(format!("backup.{}.json", timestamp))
        .to_string_lossy()
        .into_owned()
}

/// Copies an existing output file aside before it gets overwritten.
/// Returns the backup path, or `None` when there was nothing to back up.
pub async fn backup_existing<S: Storage>(
    storage: &S,
    path: &str,
    timestamp: i64,
) -> Result<Option<String>> {
    if !storage.exists(path).await {
        return Ok(None);
    }

    let target = backup_path(path, timestamp);
    let data = storage.read_file(path).await?;
    storage.write_file(&target, &data).await?;
    tracing::info!("Backed up existing file to: {}", storage.location(&target));
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path("imported-activities.json", 1700000000),
            "imported-activities.backup.1700000000.json"
        );
        assert_eq!(
            backup_path("cards/vegan-phrases.json", 5),
            "cards/vegan-phrases.backup.5.json"
        );
        assert_eq!(backup_path("notes", 5), "notes.backup.5.json");
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/dir/out.json", b"[]").await.unwrap();

        assert!(storage.exists("nested/dir/out.json").await);
        assert_eq!(storage.read_file("nested/dir/out.json").await.unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_backup_existing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert_eq!(backup_existing(&storage, "out.json", 1).await.unwrap(), None);

        storage.write_file("out.json", b"{\"old\":true}").await.unwrap();
        let backup = backup_existing(&storage, "out.json", 1).await.unwrap();

        assert_eq!(backup.as_deref(), Some("out.backup.1.json"));
        assert_eq!(
            storage.read_file("out.backup.1.json").await.unwrap(),
            b"{\"old\":true}"
        );
    }
}
