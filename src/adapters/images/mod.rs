//! Screenshot loading. Files become base64 data URLs for the LLM.

use crate::domain::{DomainError, ImageAttachment};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::path::Path;

/// MIME type by file extension. Only formats the vision API accepts.
fn mime_for_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Load an image file and encode it as a "data:image/...;base64,..." URL.
///
/// # Errors
/// Returns `DomainError::Image` for unsupported extensions or read failures.
pub async fn load_attachment(path: &Path) -> Result<ImageAttachment, DomainError> {
    let mime = mime_for_extension(path).ok_or_else(|| {
        DomainError::Image(format!(
            "Unsupported image type: {} (expected png/jpg/jpeg)",
            path.display()
        ))
    })?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::Image(format!("Failed to read {}: {}", path.display(), e)))?;

    let encoded = STANDARD.encode(&bytes);
    Ok(ImageAttachment {
        data_url: format!("data:{};base64,{}", mime, encoded),
    })
}

/// Load several attachments; the first failure aborts the batch so the user
/// can fix the path instead of silently sending fewer screenshots.
pub async fn load_attachments(paths: &[std::path::PathBuf]) -> Result<Vec<ImageAttachment>, DomainError> {
    let mut attachments = Vec::with_capacity(paths.len());
    for path in paths {
        attachments.push(load_attachment(path).await?);
    }
    Ok(attachments)
}
