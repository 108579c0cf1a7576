use anyhow::Result;
use directories::ProjectDirs;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// FileConnection owns the data directory that file-backed stores write into
#[derive(Debug, Clone)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        debug!("Using data directory: {}", base_path.display());
        Ok(Self {
            base_directory: base_path,
        })
    }

    /// The platform's per-user data directory for this application
    /// (e.g. `~/.local/share/food-tracker` on Linux)
    pub fn default_data_directory() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "food-tracker")
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Write `contents` to `path` atomically: write a temp file, then rename over the target
    pub fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}
