//! File uploads.
//!
//! The returned URL is meant to be written into a record field
//! (`image_url`, `photo_url`, ...) by the caller; the upload itself never
//! touches any record.

use masjid_records::UploadedFile;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::info;

use crate::client::{ApiClient, ApiError};

/// Multipart field the backend reads the file from
const FILE_FIELD: &str = "file";

/// A bad content type is a problem with the file, not the connection.
fn file_part(file_name: &str, bytes: Vec<u8>, mime: &str) -> Result<Part, ApiError> {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .map_err(|e| ApiError::InvalidFile(format!("{}: {}", file_name, e)))
}

#[derive(Clone, Debug)]
pub struct UploadApi {
    api: ApiClient,
}

impl UploadApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /upload` with the bytes as multipart field `file`.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedFile, ApiError> {
        if bytes.is_empty() {
            return Err(ApiError::InvalidFile(format!("{} kosong", file_name)));
        }

        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let size = bytes.len();
        let part = file_part(file_name, bytes, mime.essence_str())?;
        let form = Form::new().part(FILE_FIELD, part);

        let uploaded: UploadedFile = self.api.post_multipart("upload", form).await?;
        info!(file = file_name, size, url = %uploaded.url, "Uploaded file");
        Ok(uploaded)
    }

    /// Read a file from disk and upload it under its own name.
    pub async fn upload_path(&self, path: &Path) -> Result<UploadedFile, ApiError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::InvalidFile(path.display().to_string()))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::InvalidFile(format!("{}: {}", path.display(), e)))?;
        self.upload(&file_name, bytes).await
    }
}
