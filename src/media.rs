//! Media item data model and extension recognition.

use std::path::Path;
use std::time::SystemTime;

pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "avi"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Classify a lowercase extension (without the dot), or `None` if the
    /// extension is not a recognized media type.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        if PHOTO_EXTENSIONS.contains(&ext) {
            Some(Self::Photo)
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// One entry in a catalog snapshot. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Stable within a snapshot; derived from the resolved locator.
    pub id: String,
    /// Display label, extension stripped.
    pub name: String,
    /// Opaque reference the presentation layer resolves to bytes.
    pub locator: String,
    pub kind: MediaKind,
    /// Lowercase, without the dot.
    pub extension: String,
    pub modified_at: Option<SystemTime>,
}

impl MediaItem {
    /// Build an item from a filesystem path, or `None` when the extension is
    /// not a recognized photo/video type.
    #[must_use]
    pub fn from_path(path: &Path, modified_at: Option<SystemTime>) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let kind = MediaKind::from_extension(&extension)?;
        let name = path.file_stem()?.to_string_lossy().into_owned();
        let locator = path.to_string_lossy().into_owned();
        Some(Self {
            id: locator.clone(),
            name,
            locator,
            kind,
            extension,
            modified_at,
        })
    }

    #[must_use]
    pub fn is_photo(&self) -> bool {
        self.kind == MediaKind::Photo
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}
