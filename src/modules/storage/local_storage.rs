//! Local disk storage for uploaded files
//!
//! Files land flat in the configured upload directory under a random name and
//! are served read-only under [`UPLOADS_PATH`].

use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::core::config::UploadConfig;
use crate::core::error::AppError;
use crate::shared::constants::UPLOADS_PATH;

pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    /// Create the storage, making sure the upload directory exists
    pub async fn new(config: &UploadConfig) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(&config.dir).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory '{}': {}",
                config.dir.display(),
                e
            ))
        })?;

        Ok(Self {
            root: config.dir.clone(),
            public_base_url: config.public_base_url.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Random unique file name keeping the extension of `original_filename`
    pub fn generate_file_name(original_filename: &str) -> String {
        let id = Uuid::new_v4();
        match file_extension(original_filename) {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        }
    }

    /// Write `data` under `file_name`, returning its public URL
    pub async fn save(&self, file_name: &str, data: &[u8]) -> Result<String, AppError> {
        let path = self.root.join(file_name);
        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(format!("Failed to store file '{}': {}", file_name, e))
        })?;

        debug!("Stored upload '{}' ({} bytes)", path.display(), data.len());
        Ok(self.public_url(file_name))
    }

    pub fn public_url(&self, file_name: &str) -> String {
        format!("{}{}/{}", self.public_base_url, UPLOADS_PATH, file_name)
    }
}

/// Lower-cased extension of a client file name, if it has a usable one
fn file_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 16 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
