use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use cytokine_viewer::app::CytokineViewerApp;
use cytokine_viewer::config::{Cli, Command, ViewArgs};
use cytokine_viewer::data::loader::load_dataset;
use cytokine_viewer::export::write_export;
use cytokine_viewer::render::{HtmlTable, RenderTarget, TableView};
use cytokine_viewer::state::Viewer;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        None => run_window(cli.data),
        Some(Command::Render { view, out }) => render_headless(&cli.data, view, out.as_deref()),
        Some(Command::Export { view, out }) => export_headless(&cli.data, view, out.as_deref()),
    }
}

fn run_window(data: PathBuf) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cytokine Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(CytokineViewerApp::new(data)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer window: {e}"))
}

fn render_headless(data: &Path, view: ViewArgs, out: Option<&Path>) -> Result<()> {
    let mut html = HtmlTable::default();
    match load_dataset(data) {
        Ok(dataset) => {
            let viewer = Viewer::with_view(dataset, view.into());
            print_summary(&viewer);
            html.render(&TableView::from_viewer(&viewer));
            write_output(out, &html.body)?;
            eprintln!("{}", html.info);
            Ok(())
        }
        Err(e) => {
            html.render_error(e.user_message());
            write_output(out, &html.body)?;
            Err(e).context("loading dataset")
        }
    }
}

fn export_headless(data: &Path, view: ViewArgs, out: Option<&Path>) -> Result<()> {
    let dataset = load_dataset(data).context("loading dataset")?;
    let viewer = Viewer::with_view(dataset, view.into());
    let target = out.unwrap_or(Path::new("."));
    let written = write_export(&viewer, target).context("exporting CSV")?;
    eprintln!(
        "Wrote {} of {} cytokines to {}",
        viewer.visible_indices().len(),
        viewer.dataset().len(),
        written.display()
    );
    Ok(())
}

fn print_summary(viewer: &Viewer) {
    let stats = viewer.summary();
    eprintln!(
        "Cytokines: {}  Measurements: {}  With data: {}",
        stats.total_entries, stats.total_measurements, stats.entries_with_data
    );
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display())),
        None => std::io::stdout()
            .write_all(text.as_bytes())
            .context("writing to stdout"),
    }
}
