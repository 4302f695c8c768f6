use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::UploadResponseDto;
use crate::modules::storage::LocalStorage;

pub struct UploadService {
    storage: LocalStorage,
    max_file_size: usize,
}

impl UploadService {
    pub fn new(storage: LocalStorage, max_file_size: usize) -> Self {
        Self {
            storage,
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Store an uploaded file under a fresh random name
    pub async fn upload(&self, original_filename: &str, data: &[u8]) -> Result<UploadResponseDto> {
        if data.len() > self.max_file_size {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                self.max_file_size,
                self.max_file_size / 1024 / 1024
            )));
        }

        let file_name = LocalStorage::generate_file_name(original_filename);
        let url = self.storage.save(&file_name, data).await?;

        info!(
            "Stored upload '{}' as '{}' ({} bytes)",
            original_filename,
            file_name,
            data.len()
        );
        Ok(UploadResponseDto { url })
    }
}
