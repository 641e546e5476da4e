//! Presentation ordering, including the cached random shuffle.
//!
//! The shuffle is computed once per entry into `Random` mode (or when the
//! backing item set changes while `Random` is active) and reused on every
//! subsequent read. Reshuffling on each read would make "next" jump to an
//! unrelated item whenever the list is re-derived.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::media::MediaItem;

/// Presentation order. `None` keeps the catalog's native order (newest
/// first when sourced from a folder). Cycles `None -> Random ->
/// Alphabetical -> ReverseAlphabetical -> None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayOrder {
    #[default]
    None,
    Random,
    Alphabetical,
    ReverseAlphabetical,
}

impl DisplayOrder {
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::Random,
            Self::Random => Self::Alphabetical,
            Self::Alphabetical => Self::ReverseAlphabetical,
            Self::ReverseAlphabetical => Self::None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "no order",
            Self::Random => "random",
            Self::Alphabetical => "alphabetical",
            Self::ReverseAlphabetical => "reverse alphabetical",
        }
    }
}

pub struct OrderingEngine {
    order: DisplayOrder,
    rng: StdRng,
    // Shuffle cached per (item-set fingerprint, Random-mode entry).
    shuffled: Option<(u64, Vec<MediaItem>)>,
}

impl OrderingEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            order: DisplayOrder::default(),
            rng: StdRng::seed_from_u64(seed),
            shuffled: None,
        }
    }

    #[must_use]
    pub fn order(&self) -> DisplayOrder {
        self.order
    }

    /// Advance to the next order mode. Entering `Random` drops the cached
    /// shuffle so a fresh permutation is drawn on the next `apply`.
    pub fn cycle(&mut self) -> DisplayOrder {
        self.order = self.order.cycle();
        if self.order == DisplayOrder::Random {
            self.shuffled = None;
        }
        debug!(order = self.order.label(), "display order changed");
        self.order
    }

    /// Forget the cached shuffle. Called when the catalog itself changes so
    /// a new folder never reuses a stale permutation.
    pub fn invalidate(&mut self) {
        self.shuffled = None;
    }

    /// Derive the presentation order for `items` under the current mode.
    /// Never mutates the input; `Random` reuses the cached permutation while
    /// the item set is unchanged.
    #[must_use]
    pub fn apply(&mut self, items: &[MediaItem]) -> Vec<MediaItem> {
        match self.order {
            DisplayOrder::None => items.to_vec(),
            DisplayOrder::Random => self.shuffle(items),
            DisplayOrder::Alphabetical => {
                let mut out = items.to_vec();
                out.sort_by(|a, b| fold_name(&a.name).cmp(&fold_name(&b.name)));
                out
            }
            DisplayOrder::ReverseAlphabetical => {
                let mut out = items.to_vec();
                out.sort_by(|a, b| fold_name(&b.name).cmp(&fold_name(&a.name)));
                out
            }
        }
    }

    fn shuffle(&mut self, items: &[MediaItem]) -> Vec<MediaItem> {
        let key = fingerprint(items);
        if let Some((cached_key, cached)) = &self.shuffled
            && *cached_key == key
        {
            return cached.clone();
        }
        let mut out = items.to_vec();
        out.shuffle(&mut self.rng);
        self.shuffled = Some((key, out.clone()));
        out
    }
}

impl Default for OrderingEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

fn fingerprint(items: &[MediaItem]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for item in items {
        item.id.hash(&mut hasher);
    }
    hasher.finish()
}
