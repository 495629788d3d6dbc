use super::model::{Dataset, Entry};

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// Name substring test. An empty needle matches everything.
///
/// `needle_lower` must already be lowercased; it is computed once per
/// filter pass rather than once per entry.
fn matches_name(entry: &Entry, needle_lower: &str) -> bool {
    needle_lower.is_empty() || entry.name.to_lowercase().contains(needle_lower)
}

/// Sample threshold test. A zero threshold matches everything.
fn meets_threshold(entry: &Entry, min_samples: u64) -> bool {
    min_samples == 0 || entry.max_sample_count() >= min_samples
}

/// Return indices (in dataset order) of entries passing both filters.
///
/// An entry passes when:
/// * `filter_text` is empty, or its name contains `filter_text` ignoring case
/// * `min_samples` is zero, or some stage has at least `min_samples` samples
pub fn filtered_indices(dataset: &Dataset, filter_text: &str, min_samples: u64) -> Vec<usize> {
    let needle = filter_text.to_lowercase();
    dataset
        .entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches_name(entry, &needle) && meets_threshold(entry, min_samples))
        .map(|(i, _)| i)
        .collect()
}
