use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stage – the fixed set of sample groups
// ---------------------------------------------------------------------------

/// A disease stage (or the control group) under which an entry may carry
/// measurement statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Control,
    Stage1,
    Stage2,
    Stage3,
    Stage4,
}

impl Stage {
    /// Display / export order.
    pub const ALL: [Stage; 5] = [
        Stage::Control,
        Stage::Stage1,
        Stage::Stage2,
        Stage::Stage3,
        Stage::Stage4,
    ];

    /// Key used in the `stages` mapping of the source JSON.
    pub fn key(self) -> &'static str {
        match self {
            Stage::Control => "control",
            Stage::Stage1 => "1",
            Stage::Stage2 => "2",
            Stage::Stage3 => "3",
            Stage::Stage4 => "4",
        }
    }

    /// Human-readable column label.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Control => "Control",
            Stage::Stage1 => "Stage 1",
            Stage::Stage2 => "Stage 2",
            Stage::Stage3 => "Stage 3",
            Stage::Stage4 => "Stage 4",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StageStat – statistics for one entry at one stage
// ---------------------------------------------------------------------------

/// Sample count, mean and standard deviation for one entry at one stage.
///
/// Every field is optional on the wire: a missing or `null` count reads as
/// zero, a missing mean / deviation stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageStat {
    #[serde(rename = "n", alias = "sampleCount", default, deserialize_with = "count_or_zero")]
    pub sample_count: u64,
    #[serde(rename = "среднее", alias = "mean", default)]
    pub mean: Option<f64>,
    #[serde(rename = "стд_отклонение", alias = "stdDeviation", default)]
    pub std_deviation: Option<f64>,
}

impl StageStat {
    /// A stat with zero samples is "no data", same as an absent stage.
    pub fn has_data(&self) -> bool {
        self.sample_count > 0
    }

    pub fn mean_or_zero(&self) -> f64 {
        self.mean.unwrap_or(0.0)
    }

    pub fn std_or_zero(&self) -> f64 {
        self.std_deviation.unwrap_or(0.0)
    }
}

fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Entry – one biomarker
// ---------------------------------------------------------------------------

/// One cytokine with its per-stage statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "название", alias = "name")]
    pub name: String,
    /// Stage key → stats. Keys outside [`Stage::ALL`] are kept but never shown.
    #[serde(rename = "стадии", alias = "stages", default)]
    pub stages: BTreeMap<String, StageStat>,
}

impl Entry {
    /// Stats for a known stage, if the source carried any.
    pub fn stage(&self, stage: Stage) -> Option<&StageStat> {
        self.stages.get(stage.key())
    }

    /// Stats for a known stage only when it has at least one sample.
    pub fn stage_with_data(&self, stage: Stage) -> Option<&StageStat> {
        self.stage(stage).filter(|s| s.has_data())
    }

    /// Mean used for ordering: absent stage, zero samples or missing mean
    /// all count as zero.
    pub fn mean_for_sort(&self, stage: Stage) -> f64 {
        self.stage_with_data(stage)
            .map(StageStat::mean_or_zero)
            .unwrap_or(0.0)
    }

    /// Whether any stage (known or not) carries at least one sample.
    pub fn has_any_data(&self) -> bool {
        self.stages.values().any(StageStat::has_data)
    }

    /// Largest sample count over all stages.
    pub fn max_sample_count(&self) -> u64 {
        self.stages
            .values()
            .map(|s| s.sample_count)
            .max()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded document
// ---------------------------------------------------------------------------

/// Dataset-level metadata. Keys other than the measurement total are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "всего_измерений", alias = "totalMeasurements")]
    pub total_measurements: u64,
}

/// The full parsed dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "цитокины", alias = "entries")]
    pub entries: Vec<Entry>,
    #[serde(rename = "метаданные", alias = "metadata")]
    pub metadata: Metadata,
}

impl Dataset {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
