use std::cmp::Ordering;
use std::fmt;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;

use super::model::{Dataset, Entry, Stage};

/// Column the visible entries are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    Control,
    Stage1,
    Stage2,
    Stage3,
    Stage4,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::Control,
        SortKey::Stage1,
        SortKey::Stage2,
        SortKey::Stage3,
        SortKey::Stage4,
    ];

    /// The stage whose mean drives the order, `None` for name ordering.
    pub fn stage(self) -> Option<Stage> {
        match self {
            SortKey::Name => None,
            SortKey::Control => Some(Stage::Control),
            SortKey::Stage1 => Some(Stage::Stage1),
            SortKey::Stage2 => Some(Stage::Stage2),
            SortKey::Stage3 => Some(Stage::Stage3),
            SortKey::Stage4 => Some(Stage::Stage4),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage() {
            None => f.write_str("Name"),
            Some(stage) => write!(f, "{stage} mean"),
        }
    }
}

/// Locale-aware name ordering (Russian CLDR collation, which orders Latin
/// names as the root collation does).
///
/// Case-only differences put lowercase first; punctuation sorts before
/// digits and accented letters sit next to their base letter.
pub struct NameCollator {
    inner: Option<CollatorBorrowed<'static>>,
}

impl NameCollator {
    pub fn new() -> Self {
        let inner = match Collator::try_new(locale!("ru").into(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                log::warn!("Collation data unavailable, ordering names case-insensitively: {e}");
                None
            }
        };
        NameCollator { inner }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.inner {
            Some(collator) => collator.compare(a, b),
            None => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two names with a one-off [`NameCollator`].
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NameCollator::new().compare(a, b)
}

fn compare_means(a: &Entry, b: &Entry, stage: Stage) -> Ordering {
    // Descending by mean.
    b.mean_for_sort(stage).total_cmp(&a.mean_for_sort(stage))
}

/// Reorder `indices` in place by `key`. Stable: ties keep their input order.
pub fn sort_indices(dataset: &Dataset, indices: &mut [usize], key: SortKey) {
    let entry = |i: usize| &dataset.entries[i];
    match key.stage() {
        None => {
            let collator = NameCollator::new();
            indices.sort_by(|&a, &b| collator.compare(&entry(a).name, &entry(b).name));
        }
        Some(stage) => indices.sort_by(|&a, &b| compare_means(entry(a), entry(b), stage)),
    }
}
