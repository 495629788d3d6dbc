use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use eframe::egui;

use crate::data::loader::{LoadError, spawn_load};
use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CytokineViewerApp {
    pub state: AppState,
    /// In-flight load; dropped once the outcome arrives.
    pending: Option<Receiver<Result<Dataset, LoadError>>>,
}

impl CytokineViewerApp {
    /// Start loading `data_path` in the background.
    pub fn new(data_path: PathBuf) -> Self {
        let mut state = AppState::default();
        state.load.begin();
        log::info!("Loading dataset from {}", data_path.display());
        Self {
            state,
            pending: Some(spawn_load(data_path)),
        }
    }

    fn poll_load(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.state.load.finish(outcome);
                self.pending = None;
            }
            Err(TryRecvError::Empty) => ctx.request_repaint_after(Duration::from_millis(100)),
            Err(TryRecvError::Disconnected) => {
                log::error!("Dataset loader exited without a result");
                self.state.load.abort("Failed to load data.");
                self.pending = None;
            }
        }
    }
}

impl eframe::App for CytokineViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load(ctx);

        // ---- Top panel: menu bar + summary counters ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::central_panel(ui, &self.state.load);
        });
    }
}
