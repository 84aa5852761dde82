//! Media Storage
//!
//! Uploaded images are stored content-addressed (`<blake3>.<ext>`) under the
//! media directory and served from `/media`.

use std::path::Path;

use super::error::ApiError;
use super::form::UploadedFile;

pub const MEDIA_URL: &str = "/media";

/// Image MIME type of an upload, from its declared type or its file name
pub fn image_mime(file: &UploadedFile) -> Option<mime_guess::Mime> {
    let declared = file
        .content_type
        .as_deref()
        .and_then(|ct| ct.parse::<mime_guess::Mime>().ok())
        .filter(|m| m.type_() == mime_guess::mime::IMAGE);
    declared.or_else(|| {
        file.file_name
            .as_deref()
            .and_then(|name| mime_guess::from_path(name).first())
            .filter(|m| m.type_() == mime_guess::mime::IMAGE)
    })
}

/// Stored file name for the bytes and type
pub fn content_name(bytes: &[u8], mime: &mime_guess::Mime) -> String {
    let ext = mime_guess::get_mime_extensions(mime)
        .and_then(|exts| exts.first())
        .copied()
        .unwrap_or("bin");
    format!("{}.{}", blake3::hash(bytes).to_hex(), ext)
}

/// Write the image below `<media_dir>/<folder>/` and return its public URL.
/// Identical uploads share one file.
pub async fn store_image(
    media_dir: &Path,
    folder: &str,
    file: &UploadedFile,
    mime: &mime_guess::Mime,
) -> Result<String, ApiError> {
    let name = content_name(&file.bytes, mime);
    let dir = media_dir.join(folder);
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(&name);
    if tokio::fs::try_exists(&path).await? {
        tracing::debug!(file = %name, "image already stored");
    } else {
        tokio::fs::write(&path, &file.bytes).await?;
        tracing::info!(file = %name, size = file.bytes.len(), "stored image");
    }
    Ok(format!("{}/{}/{}", MEDIA_URL, folder, name))
}
