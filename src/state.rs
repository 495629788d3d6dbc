use crate::data::filter::filtered_indices;
use crate::data::loader::LoadError;
use crate::data::model::{Dataset, Entry};
use crate::data::sort::{SortKey, sort_indices};
use crate::data::stats::SummaryStats;

// ---------------------------------------------------------------------------
// View inputs
// ---------------------------------------------------------------------------

/// Filter and sort inputs driving the visible subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Case-insensitive substring matched against entry names.
    pub filter_text: String,
    /// Minimum sample count some stage must reach; zero disables the test.
    pub min_samples: u64,
    pub sort_key: SortKey,
}

// ---------------------------------------------------------------------------
// Viewer – a loaded dataset plus its derived view
// ---------------------------------------------------------------------------

/// The loaded dataset, its summary counters and the current view.
///
/// `visible` holds indices into `dataset.entries`; entries are never copied
/// or modified.
#[derive(Debug, Clone)]
pub struct Viewer {
    dataset: Dataset,
    summary: SummaryStats,
    view: ViewState,
    visible: Vec<usize>,
}

impl Viewer {
    /// Ingest a freshly loaded dataset. Every entry is shown in file order
    /// until the first view change is applied.
    pub fn new(dataset: Dataset) -> Self {
        let summary = SummaryStats::compute(&dataset);
        let visible = (0..dataset.len()).collect();
        Viewer {
            dataset,
            summary,
            view: ViewState::default(),
            visible,
        }
    }

    pub fn with_view(dataset: Dataset, view: ViewState) -> Self {
        let summary = SummaryStats::compute(&dataset);
        let mut viewer = Viewer {
            dataset,
            summary,
            view,
            visible: Vec::new(),
        };
        viewer.refresh();
        viewer
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Indices of the visible entries, in display order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// The visible entries, in display order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.visible.iter().map(|&i| &self.dataset.entries[i])
    }

    /// Replace the view inputs and recompute the visible entries.
    pub fn apply(&mut self, view: ViewState) {
        self.view = view;
        self.refresh();
    }

    /// Back to the unfiltered, name-ordered view.
    pub fn reset(&mut self) {
        self.apply(ViewState::default());
    }

    /// Recompute `visible` from the current view inputs.
    fn refresh(&mut self) {
        let mut indices =
            filtered_indices(&self.dataset, &self.view.filter_text, self.view.min_samples);
        sort_indices(&self.dataset, &mut indices, self.view.sort_key);
        log::debug!(
            "View {:?}: {} of {} entries visible",
            self.view,
            indices.len(),
            self.dataset.len()
        );
        self.visible = indices;
    }
}

// ---------------------------------------------------------------------------
// Load lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle of the viewer. Transitions only on the load outcome:
/// `Uninitialized → Loading → Ready | Failed`. `Failed` is terminal.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    Ready(Box<Viewer>),
    Failed(String),
}

impl LoadState {
    /// `Uninitialized → Loading`. Ignored in any other state.
    pub fn begin(&mut self) {
        if matches!(self, LoadState::Uninitialized) {
            *self = LoadState::Loading;
        }
    }

    /// `Loading → Ready | Failed`. Ignored unless a load is in flight.
    pub fn finish(&mut self, outcome: Result<Dataset, LoadError>) {
        if !matches!(self, LoadState::Loading) {
            log::warn!("Dropping load result received outside the loading state");
            return;
        }
        *self = match outcome {
            Ok(dataset) => LoadState::Ready(Box::new(Viewer::new(dataset))),
            Err(e) => LoadState::Failed(e.user_message().to_string()),
        };
    }

    /// `Loading → Failed` when the load ends without delivering an outcome.
    pub fn abort(&mut self, message: &str) {
        if matches!(self, LoadState::Loading) {
            *self = LoadState::Failed(message.to_string());
        }
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        match self {
            LoadState::Ready(viewer) => Some(&**viewer),
            _ => None,
        }
    }

    pub fn viewer_mut(&mut self) -> Option<&mut Viewer> {
        match self {
            LoadState::Ready(viewer) => Some(&mut **viewer),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    pub load: LoadState,

    /// Filter inputs as currently typed into the controls.
    pub draft: ViewState,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Push the typed inputs into the viewer. No-op until the data is ready.
    pub fn apply_draft(&mut self) {
        let draft = self.draft.clone();
        if let Some(viewer) = self.load.viewer_mut() {
            if viewer.view() != &draft {
                viewer.apply(draft);
            }
        }
    }

    /// Clear the inputs and show the whole dataset again.
    pub fn reset(&mut self) {
        self.draft = ViewState::default();
        if let Some(viewer) = self.load.viewer_mut() {
            viewer.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_dataset, parse_dataset};

    fn dataset() -> Dataset {
        parse_dataset(
            r#"{"entries": [
                {"name": "IL-6",  "stages": {"control": {"n": 10, "mean": 5.0, "stdDeviation": 1.0}}},
                {"name": "IL-10", "stages": {}}
            ], "metadata": {"totalMeasurements": 10}}"#,
        )
        .unwrap()
    }

    fn visible_names(viewer: &Viewer) -> Vec<&str> {
        viewer.visible_entries().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_new_viewer_shows_everything_in_file_order() {
        let viewer = Viewer::new(dataset());
        assert_eq!(viewer.visible_indices().len(), viewer.dataset().len());
        assert_eq!(visible_names(&viewer), ["IL-6", "IL-10"]);
    }

    #[test]
    fn test_applying_default_view_sorts_by_name() {
        let mut viewer = Viewer::new(dataset());
        viewer.apply(ViewState::default());
        assert_eq!(visible_names(&viewer), ["IL-10", "IL-6"]);
    }

    #[test]
    fn test_threshold_then_stage_sort() {
        let mut viewer = Viewer::new(dataset());
        viewer.apply(ViewState {
            min_samples: 1,
            ..ViewState::default()
        });
        assert_eq!(visible_names(&viewer), ["IL-6"]);

        viewer.apply(ViewState {
            min_samples: 1,
            sort_key: SortKey::Control,
            ..ViewState::default()
        });
        assert_eq!(visible_names(&viewer), ["IL-6"]);
        assert_eq!(viewer.summary().entries_with_data, 1);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let view = ViewState {
            filter_text: "il".into(),
            min_samples: 0,
            sort_key: SortKey::Control,
        };
        let mut viewer = Viewer::new(dataset());
        viewer.apply(view.clone());
        let first = viewer.visible_indices().to_vec();
        viewer.apply(view);
        assert_eq!(viewer.visible_indices(), first.as_slice());
    }

    #[test]
    fn test_reset_restores_default_view() {
        let mut viewer = Viewer::new(dataset());
        viewer.apply(ViewState {
            filter_text: "zzz".into(),
            min_samples: 3,
            sort_key: SortKey::Stage2,
        });
        assert!(viewer.visible_indices().is_empty());

        viewer.reset();
        assert_eq!(viewer.view(), &ViewState::default());
        assert_eq!(viewer.visible_indices().len(), 2);
    }

    #[test]
    fn test_summary_is_fixed_across_filters() {
        let mut viewer = Viewer::new(dataset());
        let before = *viewer.summary();
        viewer.apply(ViewState {
            filter_text: "nothing".into(),
            ..ViewState::default()
        });
        assert_eq!(*viewer.summary(), before);
    }

    #[test]
    fn test_load_state_success_path() {
        let mut state = LoadState::default();
        assert!(matches!(state, LoadState::Uninitialized));
        state.begin();
        assert!(matches!(state, LoadState::Loading));
        state.finish(Ok(dataset()));
        assert!(state.viewer().is_some());
    }

    #[test]
    fn test_load_state_failure_is_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();

        let mut state = LoadState::default();
        state.begin();
        state.finish(load_dataset(&path));
        assert!(matches!(&state, LoadState::Failed(msg) if msg == "Failed to load data."));
        assert!(state.viewer().is_none());

        state.begin();
        state.finish(Ok(dataset()));
        assert!(matches!(state, LoadState::Failed(_)));
    }

    #[test]
    fn test_abort_only_while_loading() {
        let mut state = LoadState::default();
        state.abort("Failed to load data.");
        assert!(matches!(state, LoadState::Uninitialized));
        state.begin();
        state.abort("Failed to load data.");
        assert!(matches!(state, LoadState::Failed(_)));
    }

    #[test]
    fn test_app_state_applies_draft_once_ready() {
        let mut app = AppState::default();
        app.draft.filter_text = "10".into();
        app.apply_draft();
        assert!(app.load.viewer().is_none());

        app.load.begin();
        app.load.finish(Ok(dataset()));
        app.apply_draft();
        assert_eq!(visible_names(app.load.viewer().unwrap()), ["IL-10"]);

        app.reset();
        assert_eq!(app.draft, ViewState::default());
        assert_eq!(app.load.viewer().unwrap().visible_indices().len(), 2);
    }

    #[test]
    fn test_finish_without_begin_is_ignored() {
        let mut state = LoadState::default();
        state.finish(Ok(dataset()));
        assert!(matches!(state, LoadState::Uninitialized));
    }
}
