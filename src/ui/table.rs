use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Stage;
use crate::render::{CellView, NO_DATA, NO_MATCHES, RenderTarget, TableView};
use crate::state::LoadState;

const HEADER_HEIGHT: f32 = 22.0;
/// Three text lines per stage cell.
const ROW_HEIGHT: f32 = 54.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the central panel for the current load state.
pub fn central_panel(ui: &mut Ui, load: &LoadState) {
    match load {
        LoadState::Uninitialized | LoadState::Loading => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.spinner();
            });
        }
        LoadState::Failed(message) => EguiTable::new(ui).render_error(message),
        LoadState::Ready(viewer) => EguiTable::new(ui).render(&TableView::from_viewer(viewer)),
    }
}

// ---------------------------------------------------------------------------
// egui render target
// ---------------------------------------------------------------------------

/// Draws a [`TableView`] into an egui `Ui` with `egui_extras` tables.
pub struct EguiTable<'a> {
    ui: &'a mut Ui,
}

impl<'a> EguiTable<'a> {
    pub fn new(ui: &'a mut Ui) -> Self {
        Self { ui }
    }
}

impl RenderTarget for EguiTable<'_> {
    fn render(&mut self, view: &TableView) {
        let ui = &mut *self.ui;
        ui.label(format!("Cytokines shown: {}", view.summary_line()));
        ui.separator();

        if view.is_empty() {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(NO_MATCHES).weak());
            });
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::initial(160.0).at_least(80.0))
            .columns(Column::initial(110.0).at_least(60.0), Stage::ALL.len())
            .column(Column::remainder())
            .header(HEADER_HEIGHT, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("Cytokine");
                });
                for stage in Stage::ALL {
                    header.col(|ui: &mut Ui| {
                        ui.strong(stage.label());
                    });
                }
                header.col(|_ui: &mut Ui| {});
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.rows.len(), |mut row| {
                    let r = &view.rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.hyperlink_to(r.name.as_str(), &r.detail_url);
                    });
                    for cell in &r.cells {
                        row.col(|ui: &mut Ui| stage_cell(ui, cell));
                    }
                    row.col(|ui: &mut Ui| {
                        ui.hyperlink_to("Details", &r.detail_url);
                    });
                });
            });
    }

    fn render_error(&mut self, message: &str) {
        self.ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(message).color(Color32::RED));
        });
    }
}

fn stage_cell(ui: &mut Ui, cell: &CellView) {
    match cell {
        CellView::Data {
            sample_count,
            mean,
            std_deviation,
        } => {
            ui.vertical(|ui: &mut Ui| {
                ui.label(format!("n = {sample_count}"));
                ui.label(mean.as_str());
                ui.label(RichText::new(std_deviation.as_str()).weak().small());
            });
        }
        CellView::NoData => {
            ui.label(RichText::new(NO_DATA).weak());
        }
    }
}
