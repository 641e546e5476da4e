//! Folder scanning for media files.
//!
//! The catalog is the slideshow's source of truth for "what exists": it
//! enumerates recognized photo/video files under a folder, stamps each with
//! its modification time, and returns them newest-first. Failures surface as
//! a result value so the caller can show the error and treat the list as
//! empty.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::Error;
use crate::media::MediaItem;

/// Enumerate media items under `folder`, sorted by modification time
/// descending (newest first). Unrecognized extensions are skipped; hidden
/// dot-directories below the root are not descended into.
///
/// # Errors
/// Returns [`Error::BadDir`] if `folder` is missing or not a directory.
pub fn list_items(folder: &Path) -> Result<Vec<MediaItem>, Error> {
    if !folder.exists() || !folder.is_dir() {
        return Err(Error::BadDir(folder.to_string_lossy().into_owned()));
    }

    let mut items = Vec::new();
    for entry in WalkDir::new(folder)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !should_skip_dir(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path: PathBuf = entry.path().to_path_buf();
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
        match MediaItem::from_path(&path, modified) {
            Some(item) => items.push(item),
            None => debug!(path = %path.display(), "skipping unrecognized file"),
        }
    }

    // Newest first; `None` mtimes sort to the end. Ties keep scan order.
    items.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));

    info!(count = items.len(), root = %folder.display(), "catalog scan complete");
    Ok(items)
}

fn should_skip_dir(entry: &DirEntry) -> bool {
    // Never skip the root; tempfile roots can be dot-dirs.
    if entry.depth() == 0 {
        return false;
    }
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|n| n.starts_with('.'))
}
