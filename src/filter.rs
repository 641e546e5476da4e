//! Media-type filtering.

use crate::media::{MediaItem, MediaKind};

/// Which media kinds the slideshow shows. Cycles `All -> PhotosOnly ->
/// VideosOnly -> All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFilter {
    #[default]
    All,
    PhotosOnly,
    VideosOnly,
}

impl MediaFilter {
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::All => Self::PhotosOnly,
            Self::PhotosOnly => Self::VideosOnly,
            Self::VideosOnly => Self::All,
        }
    }

    #[must_use]
    pub fn admits(self, kind: MediaKind) -> bool {
        match self {
            Self::All => true,
            Self::PhotosOnly => kind == MediaKind::Photo,
            Self::VideosOnly => kind == MediaKind::Video,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::PhotosOnly => "photos only",
            Self::VideosOnly => "videos only",
        }
    }
}

/// Stable-order-preserving subsequence of `items` admitted by `filter`.
#[must_use]
pub fn apply(items: &[MediaItem], filter: MediaFilter) -> Vec<MediaItem> {
    items
        .iter()
        .filter(|item| filter.admits(item.kind))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, kind: MediaKind) -> MediaItem {
        MediaItem {
            id: name.to_string(),
            name: name.to_string(),
            locator: name.to_string(),
            kind,
            extension: String::new(),
            modified_at: None,
        }
    }

    #[test]
    fn cycle_closes_after_three_steps() {
        for start in [
            MediaFilter::All,
            MediaFilter::PhotosOnly,
            MediaFilter::VideosOnly,
        ] {
            assert_eq!(start.cycle().cycle().cycle(), start);
        }
    }

    #[test]
    fn all_preserves_everything_in_order() {
        let items = vec![
            item("a", MediaKind::Photo),
            item("b", MediaKind::Video),
            item("c", MediaKind::Photo),
        ];
        assert_eq!(apply(&items, MediaFilter::All), items);
    }

    #[test]
    fn photos_only_keeps_relative_order() {
        let items = vec![
            item("a", MediaKind::Photo),
            item("b", MediaKind::Video),
            item("c", MediaKind::Photo),
        ];
        let filtered = apply(&items, MediaFilter::PhotosOnly);
        let names: Vec<_> = filtered.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn videos_only_selects_videos() {
        let items = vec![item("a", MediaKind::Photo), item("b", MediaKind::Video)];
        let filtered = apply(&items, MediaFilter::VideosOnly);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "b");
    }
}
