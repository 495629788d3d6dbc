use super::model::Dataset;

/// Dataset-wide counters shown above the table. Computed once per load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub total_entries: usize,
    pub total_measurements: u64,
    /// Entries with at least one stage holding a sample.
    pub entries_with_data: usize,
}

impl SummaryStats {
    pub fn compute(dataset: &Dataset) -> Self {
        SummaryStats {
            total_entries: dataset.len(),
            total_measurements: dataset.metadata.total_measurements,
            entries_with_data: dataset.entries.iter().filter(|e| e.has_any_data()).count(),
        }
    }
}
