use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use trello_core::TrelloResult;

/// Writes whole files through a temporary file in the same directory,
/// so readers never see a partially written file.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Creates the parent directory when needed.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TrelloResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        fs::write(temp_file.path(), data).await?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    pub async fn read_all(path: &Path) -> TrelloResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }

    /// Like [`read_all`](Self::read_all), with a missing file as `None`.
    pub async fn read_optional(path: &Path) -> TrelloResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write_creates_parent() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("cache");

        AtomicWriter::write_atomic(&file_path, b"Hello").await.unwrap();

        let read_data = AtomicWriter::read_all(&file_path).await.unwrap();
        assert_eq!(read_data, b"Hello");
    }

    #[tokio::test]
    async fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        AtomicWriter::write_atomic(&file_path, b"First").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").await.unwrap();

        let read_data = AtomicWriter::read_all(&file_path).await.unwrap();
        assert_eq!(read_data, b"Second");
    }

    #[tokio::test]
    async fn test_read_optional_missing() {
        let dir = tempdir().unwrap();
        let missing = AtomicWriter::read_optional(&dir.path().join("nope"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
