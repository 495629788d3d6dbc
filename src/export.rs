//! CSV export of the visible rows.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::model::{Entry, Stage};
use crate::format::fixed;
use crate::state::Viewer;

/// Byte-order mark so spreadsheet tools pick UTF-8 for non-ASCII names.
pub const UTF8_BOM: &str = "\u{FEFF}";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("encoding CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Header row: name, then count / mean / deviation for each stage.
pub fn header() -> Vec<String> {
    let mut cols = vec!["Cytokine".to_string()];
    for stage in Stage::ALL {
        let label = stage.label();
        cols.push(format!("{label} (n)"));
        cols.push(format!("{label} (mean)"));
        cols.push(format!("{label} (±)"));
    }
    cols
}

/// One data row. Stages without samples yield three empty fields.
pub fn record(entry: &Entry) -> Vec<String> {
    let mut fields = Vec::with_capacity(1 + 3 * Stage::ALL.len());
    fields.push(entry.name.clone());
    for stage in Stage::ALL {
        match entry.stage_with_data(stage) {
            Some(stat) => {
                fields.push(stat.sample_count.to_string());
                fields.push(fixed(stat.mean_or_zero(), 4));
                fields.push(fixed(stat.std_or_zero(), 4));
            }
            None => fields.extend(std::iter::repeat(String::new()).take(3)),
        }
    }
    fields
}

/// Serialize entries to BOM-prefixed UTF-8 CSV.
///
/// Names containing `,`, `"` or line breaks are quoted; everything else is
/// written bare.
pub fn to_csv<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Result<Vec<u8>, ExportError> {
    let mut buf = UTF8_BOM.as_bytes().to_vec();
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(&mut buf);
        writer.write_record(header())?;
        for entry in entries {
            writer.write_record(record(entry))?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(buf)
}

/// `cytokines_YYYY-MM-DD.csv`
pub fn file_name_for(date: NaiveDate) -> String {
    format!("cytokines_{}.csv", date.format("%Y-%m-%d"))
}

/// Export file name for today's local date.
pub fn default_file_name() -> String {
    file_name_for(chrono::Local::now().date_naive())
}

/// Write the viewer's visible rows to `target`.
///
/// A directory target receives the dated default file name. The file handle
/// is closed before returning.
pub fn write_export(viewer: &Viewer, target: &Path) -> Result<PathBuf, ExportError> {
    let path = if target.is_dir() {
        target.join(default_file_name())
    } else {
        target.to_path_buf()
    };
    let bytes = to_csv(viewer.visible_entries())?;
    std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!(
        "Exported {} cytokines to {}",
        viewer.visible_indices().len(),
        path.display()
    );
    Ok(path)
}
