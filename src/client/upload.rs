//! Embedding local image/video files into a listing as `data:` URLs.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose, Engine};
use thiserror::Error;

/// Largest file accepted for embedding
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only JPG, PNG, and MP4 files are allowed")]
    UnsupportedType,

    #[error("File size must be less than 10MB")]
    TooLarge,

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Media type for a supported file, judged by its extension
pub fn media_type(path: &Path) -> Result<&'static str, UploadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => Ok("image/jpeg"),
        Some("png") => Ok("image/png"),
        Some("mp4") => Ok("video/mp4"),
        _ => Err(UploadError::UnsupportedType),
    }
}

pub fn data_url(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{media_type};base64,{}",
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Read a JPG, PNG or MP4 file of at most 10MB into a `data:` URL.
///
/// Type and size are checked before the file is read.
pub fn embed_file(path: &Path) -> Result<String, UploadError> {
    let media_type = media_type(path)?;
    if fs::metadata(path)?.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }

    let bytes = fs::read(path)?;
    tracing::debug!(path = %path.display(), size = bytes.len(), media_type, "embedding file");
    Ok(data_url(media_type, &bytes))
}
