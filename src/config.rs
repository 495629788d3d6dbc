//! Command-line configuration.
//!
//! Usage:
//!   cytokine-viewer                                  # open the viewer window
//!   cytokine-viewer --data other.json                # custom dataset location
//!   cytokine-viewer render --search il --sort control
//!   cytokine-viewer export --min-samples 5 --out ./exports

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::loader::DEFAULT_DATA_PATH;
use crate::data::sort::SortKey;
use crate::state::ViewState;

/// Viewer for per-stage cytokine statistics.
#[derive(Debug, Parser)]
#[command(name = "cytokine-viewer", about = "Cytokine statistics viewer")]
pub struct Cli {
    /// Dataset JSON file.
    #[arg(long, env = "CYTOKINE_DATA", value_name = "PATH", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Run headless instead of opening the window.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the HTML table body for a view.
    Render {
        #[command(flatten)]
        view: ViewArgs,
        /// Write the markup here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Write the CSV export for a view.
    Export {
        #[command(flatten)]
        view: ViewArgs,
        /// Target file or directory (default: current directory).
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

/// Filter and sort inputs shared by the headless commands.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Case-insensitive name substring.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Keep cytokines with at least this many samples in some stage.
    #[arg(long, default_value_t = 0)]
    pub min_samples: u64,

    /// Sort column.
    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    pub sort: SortKey,
}

impl From<ViewArgs> for ViewState {
    fn from(args: ViewArgs) -> Self {
        ViewState {
            filter_text: args.search,
            min_samples: args.min_samples,
            sort_key: args.sort,
        }
    }
}
