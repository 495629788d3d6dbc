use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use thiserror::Error;

use super::model::Dataset;

/// Location of the dataset relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/cytokines_final.json";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. Both kinds collapse to the same
/// user-visible message; the detail goes to the log.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Message shown in place of the table.
    pub fn user_message(&self) -> &'static str {
        "Failed to load data."
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from a JSON file.
///
/// Expected schema (Russian keys as written by the generator, English
/// aliases accepted):
///
/// ```json
/// {
///   "цитокины": [
///     {
///       "название": "IL-6",
///       "стадии": {
///         "control": { "n": 10, "среднее": 5.0, "стд_отклонение": 1.0 },
///         "1":       { "n": 4,  "среднее": 7.2, "стд_отклонение": 2.1 }
///       }
///     }
///   ],
///   "метаданные": { "всего_измерений": 14 }
/// }
/// ```
///
/// Nothing is returned unless the whole document parses.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_dataset(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    warn_duplicate_names(&dataset);
    log::info!(
        "Loaded {} cytokines ({} measurements) from {}",
        dataset.len(),
        dataset.metadata.total_measurements,
        path.display()
    );
    Ok(dataset)
}

/// Parse a dataset document held in memory.
pub fn parse_dataset(text: &str) -> Result<Dataset, serde_json::Error> {
    serde_json::from_str(text)
}

/// Run [`load_dataset`] on a background thread.
///
/// The receiver yields exactly one message. Poll it with `try_recv` from the
/// UI loop; a disconnected channel without a message means the loader thread
/// died and should be treated as a failed load.
pub fn spawn_load(path: PathBuf) -> Receiver<Result<Dataset, LoadError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = load_dataset(&path);
        if let Err(e) = &outcome {
            log::error!("Failed to load dataset: {e}");
        }
        // Receiver gone means the window was closed while loading.
        let _ = tx.send(outcome);
    });
    rx
}

fn warn_duplicate_names(dataset: &Dataset) {
    let mut seen = BTreeSet::new();
    for entry in &dataset.entries {
        if !seen.insert(entry.name.as_str()) {
            log::warn!("Duplicate cytokine name in dataset: {}", entry.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SAMPLE: &str = r#"{
        "цитокины": [
            {"название": "IL-6", "стадии": {"control": {"n": 10, "среднее": 5.0, "стд_отклонение": 1.0}}},
            {"название": "IL-10", "стадии": {}}
        ],
        "метаданные": {"всего_измерений": 10, "версия": "1.0"}
    }"#;

    #[test]
    fn test_load_dataset_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cytokines.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.entries[0].name, "IL-6");
        assert_eq!(ds.entries[1].name, "IL-10");
        assert_eq!(ds.metadata.total_measurements, 10);
    }

    #[test]
    fn test_english_keys_are_accepted() {
        let ds = parse_dataset(
            r#"{"entries": [{"name": "TNF", "stages": {"3": {"sampleCount": 2, "mean": 1.0, "stdDeviation": 0.5}}}],
                "metadata": {"totalMeasurements": 2}}"#,
        )
        .unwrap();
        assert_eq!(ds.entries[0].stages["3"].sample_count, 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.user_message(), "Failed to load data.");
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"цитокины\": [").unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_metadata_is_parse_error() {
        assert!(parse_dataset(r#"{"entries": []}"#).is_err());
    }

    #[test]
    fn test_spawn_load_delivers_one_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cytokines.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let rx = spawn_load(path);
        let ds = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
        assert_eq!(ds.len(), 2);
    }
}
