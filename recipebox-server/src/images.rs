//! Image upload storage
//!
//! Stores uploaded recipe images on disk and hands back the reference
//! string embedded as `Recipe.imageUrl`. Files are served back under
//! `URL_PREFIX`.

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::info;

use crate::error::{ApiError, ApiResult};

/// Public path prefix for stored images
pub const URL_PREFIX: &str = "/uploads";

/// Accepted file extensions (lowercase)
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Accepted sniffed content types
const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Disk-backed image store
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate and persist an upload; returns its public reference
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> ApiResult<String> {
        let extension = allowed_extension(original_name)?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest("Empty upload".to_string()));
        }
        if bytes.len() > self.max_bytes {
            return Err(ApiError::PayloadTooLarge(format!(
                "{} bytes exceeds limit of {} bytes",
                bytes.len(),
                self.max_bytes
            )));
        }

        let mime = infer::get(bytes).map(|kind| kind.mime_type());
        if !mime.is_some_and(|m| ALLOWED_MIME_TYPES.contains(&m)) {
            return Err(ApiError::UnsupportedMediaType(
                "Only image files are allowed".to_string(),
            ));
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let file_name = unique_file_name(&extension);
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        info!(
            file_name = %file_name,
            size = bytes.len(),
            content_type = mime.unwrap_or("unknown"),
            "Stored uploaded image"
        );
        Ok(format!("{}/{}", URL_PREFIX, file_name))
    }
}

/// Lowercased extension of `name`, if it is an accepted image extension
fn allowed_extension(name: &str) -> ApiResult<String> {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(ApiError::UnsupportedMediaType(
            "Only image files are allowed".to_string(),
        ))
    }
}

/// `image-<unix millis>-<random>.<ext>`
fn unique_file_name(extension: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!(
        "image-{}-{}.{}",
        recipebox_common::time::now().timestamp_millis(),
        suffix,
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Smallest byte prefix `infer` recognises as PNG
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn test_allowed_extension() {
        assert_eq!(allowed_extension("cake.PNG").unwrap(), "png");
        assert_eq!(allowed_extension("cake.jpeg").unwrap(), "jpeg");
        assert!(allowed_extension("cake.exe").is_err());
        assert!(allowed_extension("cake").is_err());
    }

    #[test]
    fn test_unique_file_names_differ() {
        let a = unique_file_name("png");
        let b = unique_file_name("png");
        assert!(a.starts_with("image-"));
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_save_writes_file_under_prefix() {
        let dir = TempDir::new().unwrap();
        let store = ImageStore::new(dir.path(), 1024);

        let reference = store.save("photo.png", PNG_BYTES).await.unwrap();
        assert!(reference.starts_with("/uploads/image-"));

        let file_name = reference.trim_start_matches("/uploads/");
        assert_eq!(std::fs::read(dir.path().join(file_name)).unwrap(), PNG_BYTES);
    }

    #[tokio::test]
    async fn test_save_rejects_non_image_content() {
        let dir = TempDir::new().unwrap();
        let store = ImageStore::new(dir.path(), 1024);
        let result = store.save("photo.png", b"plain text, not an image").await;
        assert!(matches!(result, Err(ApiError::UnsupportedMediaType(_))));
    }

    #[tokio::test]
    async fn test_save_enforces_size_limit() {
        let dir = TempDir::new().unwrap();
        let store = ImageStore::new(dir.path(), 8);
        let result = store.save("photo.png", PNG_BYTES).await;
        assert!(matches!(result, Err(ApiError::PayloadTooLarge(_))));
    }
}
