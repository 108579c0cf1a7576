//! Photo selection capability.
//!
//! The picker is asynchronous and may yield nothing (the user cancelled).

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;

#[async_trait]
pub trait PhotoPicker: Send + Sync {
    /// Raw bytes of the chosen image, or `None` if nothing was chosen
    async fn pick_image(&self) -> Result<Option<Vec<u8>>>;
}

/// Picker that reads an already chosen file from disk
#[derive(Debug, Clone)]
pub struct FilePhotoPicker {
    path: PathBuf,
}

impl FilePhotoPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PhotoPicker for FilePhotoPicker {
    async fn pick_image(&self) -> Result<Option<Vec<u8>>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read photo {}", self.path.display()))?;
        debug!("Loaded {} bytes of photo data from {}", bytes.len(), self.path.display());
        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_picker_reads_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let picker = FilePhotoPicker::new(&path);
        assert_eq!(picker.pick_image().await.unwrap(), Some(vec![0xFF, 0xD8, 0xFF]));
    }

    #[tokio::test]
    async fn test_file_picker_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let picker = FilePhotoPicker::new(temp_dir.path().join("missing.jpg"));
        let err = picker.pick_image().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read photo"));
    }
}
