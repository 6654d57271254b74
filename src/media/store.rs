//! Media Storage
//!
//! Validates upload payloads and persists them under `uploads/<kind>/` with
//! generated unique filenames. Records reference files by name only; deleting
//! a record does not delete its files.

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::utils::AppError;

/// Maximum image size (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum video size (50MB)
pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;

/// Supported image formats
const IMAGE_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Supported video formats
const VIDEO_FORMATS: &[&str] = &["mp4", "webm", "mov", "m4v"];

/// Media type — selects the storage subdirectory and validation rules
///
/// The directory names double as the public serving route prefixes
/// (`/image/{file}`, `/blogVideos/{file}`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Banner,
    Blog,
    BlogVideo,
    Profile,
}

impl MediaKind {
    /// Subdirectory under the uploads root
    pub fn dir(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Banner => "banner",
            MediaKind::Blog => "blog",
            MediaKind::BlogVideo => "blogVideos",
            MediaKind::Profile => "profile",
        }
    }

    /// Whether this kind stores video payloads
    pub fn is_video(self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::BlogVideo)
    }
}

/// Media file store rooted at `work_dir/uploads`
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Directory for a media kind (`uploads/image`, `uploads/blogVideos`, ...)
    pub fn dir_for(&self, kind: MediaKind) -> PathBuf {
        self.root.join(kind.dir())
    }

    /// Validate and persist one upload; returns the generated filename
    ///
    /// Filenames are `{uuid}.{ext}` so concurrent uploads cannot collide.
    /// A filesystem write failure is fatal to the request (no retry).
    pub fn save(&self, kind: MediaKind, original_name: &str, data: &[u8]) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("Empty file provided"));
        }

        let ext = PathBuf::from(original_name)
            .extension()
            .and_then(|ext| ext.to_str().map(|s| s.to_lowercase()))
            .ok_or_else(|| {
                AppError::validation(format!("Invalid file extension for: {}", original_name))
            })?;

        if kind.is_video() {
            validate_video(data, &ext)?;
        } else {
            validate_image(data, &ext)?;
        }

        let dir = self.dir_for(kind);
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::internal(format!("Failed to create media directory: {}", e)))?;

        let filename = format!("{}.{}", Uuid::new_v4(), ext);
        let file_path = dir.join(&filename);

        fs::write(&file_path, data)
            .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

        tracing::info!(
            kind = kind.dir(),
            original_name = %original_name,
            filename = %filename,
            size = data.len(),
            "Media file stored"
        );

        Ok(filename)
    }

    /// Resolve a stored filename to its on-disk path
    ///
    /// Rejects traversal attempts; returns None for unsafe names.
    pub fn path_for(&self, kind: MediaKind, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return None;
        }
        Some(self.dir_for(kind).join(filename))
    }
}

/// Validate an image payload (size, extension, decodable)
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_IMAGE_BYTES / 1024 / 1024
        )));
    }

    if !IMAGE_FORMATS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported image format '{}'. Supported: {}",
            ext,
            IMAGE_FORMATS.join(", ")
        )));
    }

    // Verify it's actually an image by trying to load it
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext, e
        )));
    }

    Ok(())
}

/// Validate a video payload (size, extension)
fn validate_video(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_VIDEO_BYTES {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_VIDEO_BYTES / 1024 / 1024
        )));
    }

    if !VIDEO_FORMATS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported video format '{}'. Supported: {}",
            ext,
            VIDEO_FORMATS.join(", ")
        )));
    }

    Ok(())
}

/// Merge retained existing assets with newly uploaded ones
///
/// Order-preserving union, existing first; duplicates are dropped.
pub fn merge_assets(existing: Vec<String>, new: Vec<String>) -> Vec<String> {
    let mut merged = Vec::with_capacity(existing.len() + new.len());
    for name in existing.into_iter().chain(new) {
        if !merged.contains(&name) {
            merged.push(name);
        }
    }
    merged
}
