use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;

use crate::error::AppResult;
use crate::models::upload::UploadedImage;

/// Public URL prefix under which the upload directory is served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Flat directory of uploaded images. Files are append-only: nothing in the
/// service deletes them.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Relative directories are resolved against the working directory once,
    /// so stored paths are always absolute.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let dir = if dir.is_relative() {
            std::env::current_dir()
                .map(|cwd| cwd.join(&dir))
                .unwrap_or(dir)
        } else {
            dir
        };
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a freshly generated name, creating the directory
    /// first if needed.
    pub async fn save(
        &self,
        field_name: &str,
        original_name: Option<&str>,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<UploadedImage> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = unique_filename(field_name, original_name);
        let stored_path = self.dir.join(&filename);
        tokio::fs::write(&stored_path, &bytes).await?;

        tracing::debug!(
            path = %stored_path.display(),
            size = bytes.len(),
            "Image saved locally"
        );

        Ok(UploadedImage {
            stored_path,
            public_url: format!("{}/{}", UPLOADS_PREFIX, filename),
            mime_type: mime_type.to_string(),
            bytes,
        })
    }
}

/// `<field>-<epoch millis>-<nonce><.ext>`. Collisions need the same
/// millisecond and the same nonce draw.
pub fn unique_filename(field_name: &str, original_name: Option<&str>) -> String {
    let nonce: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);
    format!(
        "{}-{}-{}{}",
        field_name,
        Utc::now().timestamp_millis(),
        nonce,
        extension_of(original_name)
    )
}

/// Extension of the client-supplied filename including the dot, or empty.
/// Only ASCII alphanumeric extensions are kept.
fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
