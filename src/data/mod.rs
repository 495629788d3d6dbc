/// Data layer: core types, loading, filtering, ordering and summary counters.
///
/// Architecture:
/// ```text
///  cytokines_final.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Entry>, metadata  ──▶  stats (once per load)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  name / threshold predicates → indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sort     │  stable reorder of the indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod stats;
