//! Table rendering: a toolkit-independent row model plus render targets.
//!
//! ```text
//!   Viewer ──▶ TableView { rows: Vec<RowView>, summary } ──▶ RenderTarget
//!                                                             ├─ HtmlTable
//!                                                             └─ egui table (ui::table)
//! ```

use std::fmt::Write as _;

use crate::data::model::{Entry, Stage, StageStat};
use crate::format::fixed;
use crate::state::Viewer;

/// Placeholder for a stage without samples.
pub const NO_DATA: &str = "—";
/// Shown instead of the table body when the filters match nothing.
pub const NO_MATCHES: &str = "No cytokines match the filters";
/// Page the details action opens.
pub const DETAIL_PAGE: &str = "cytokine_detail.html";

// ---------------------------------------------------------------------------
// Row model
// ---------------------------------------------------------------------------

/// One stage cell, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    Data {
        sample_count: u64,
        /// Mean, two decimals.
        mean: String,
        /// Deviation, two decimals, `±`-prefixed.
        std_deviation: String,
    },
    NoData,
}

impl CellView {
    pub fn from_stat(stat: Option<&StageStat>) -> Self {
        match stat {
            Some(s) if s.has_data() => CellView::Data {
                sample_count: s.sample_count,
                mean: fixed(s.mean_or_zero(), 2),
                std_deviation: format!("± {}", fixed(s.std_or_zero(), 2)),
            },
            _ => CellView::NoData,
        }
    }
}

/// One table row: the name, a cell per stage and the details link.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub name: String,
    pub cells: [CellView; 5],
    pub detail_url: String,
}

impl RowView {
    pub fn from_entry(entry: &Entry) -> Self {
        RowView {
            name: entry.name.clone(),
            cells: Stage::ALL.map(|stage| CellView::from_stat(entry.stage(stage))),
            detail_url: detail_url(&entry.name),
        }
    }
}

/// Everything a render target needs to draw the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<RowView>,
    pub total: usize,
}

impl TableView {
    pub fn from_viewer(viewer: &Viewer) -> Self {
        TableView {
            rows: viewer.visible_entries().map(RowView::from_entry).collect(),
            total: viewer.dataset().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `"{count} of {total}"`, or `"0"` when nothing matches.
    pub fn summary_line(&self) -> String {
        if self.rows.is_empty() {
            "0".to_string()
        } else {
            format!("{} of {}", self.rows.len(), self.total)
        }
    }
}

// ---------------------------------------------------------------------------
// Render targets
// ---------------------------------------------------------------------------

/// Something that can display the table.
pub trait RenderTarget {
    /// Draw the rows (or the "no matches" row) and the summary line.
    fn render(&mut self, view: &TableView);

    /// Replace the table body with a single error row.
    fn render_error(&mut self, message: &str);
}

/// Renders the table body as HTML markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlTable {
    /// `<tr>` elements for the table body.
    pub body: String,
    /// Text for the info line under the table; empty after an error.
    pub info: String,
}

const COLUMN_COUNT: usize = Stage::ALL.len() + 2;

impl RenderTarget for HtmlTable {
    fn render(&mut self, view: &TableView) {
        self.body.clear();
        if view.is_empty() {
            single_row(&mut self.body, "empty-row", NO_MATCHES);
        } else {
            for row in &view.rows {
                html_row(&mut self.body, row);
            }
        }
        self.info = format!("Cytokines shown: {}", view.summary_line());
    }

    fn render_error(&mut self, message: &str) {
        self.body.clear();
        single_row(&mut self.body, "error-row", message);
        self.info.clear();
    }
}

fn single_row(out: &mut String, class: &str, text: &str) {
    let _ = writeln!(
        out,
        r#"<tr class="{class}"><td colspan="{COLUMN_COUNT}">{}</td></tr>"#,
        escape_html(text)
    );
}

fn html_row(out: &mut String, row: &RowView) {
    let name = escape_html(&row.name);
    let url = escape_html(&row.detail_url);

    out.push_str("<tr>");
    let _ = write!(
        out,
        r#"<td><a class="cytokine-name" href="{url}" target="_blank">{name}</a></td>"#
    );
    for cell in &row.cells {
        match cell {
            CellView::Data {
                sample_count,
                mean,
                std_deviation,
            } => {
                let _ = write!(
                    out,
                    r#"<td class="stage-cell"><div class="stat-value">n = {sample_count}</div><div class="stat-value">{mean}</div><div class="stat-std">{std_deviation}</div></td>"#
                );
            }
            CellView::NoData => {
                let _ = write!(out, r#"<td class="stage-cell no-data">{NO_DATA}</td>"#);
            }
        }
    }
    let _ = write!(
        out,
        r#"<td><a class="cytokine-link" href="{url}" target="_blank">Details</a></td>"#
    );
    out.push_str("</tr>\n");
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Escape text for insertion into HTML element content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a query value the way `encodeURIComponent` does.
pub fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '('
            | ')' => out.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "%{b:02X}");
                }
            }
        }
    }
    out
}

/// Link to the per-cytokine detail page.
pub fn detail_url(name: &str) -> String {
    format!("{DETAIL_PAGE}?cytokine={}", encode_uri_component(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_dataset;
    use crate::state::ViewState;

    fn viewer() -> Viewer {
        Viewer::new(
            parse_dataset(
                r#"{"entries": [
                    {"name": "IL-6", "stages": {"control": {"n": 10, "mean": 5.0, "stdDeviation": 1.0}}},
                    {"name": "<b>IL-10</b>", "stages": {"2": {"n": 0, "mean": 3.0}}}
                ], "metadata": {"totalMeasurements": 10}}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_cell_formatting() {
        let stat = StageStat {
            sample_count: 10,
            mean: Some(5.0),
            std_deviation: Some(1.005),
        };
        assert_eq!(
            CellView::from_stat(Some(&stat)),
            CellView::Data {
                sample_count: 10,
                mean: "5.00".into(),
                std_deviation: "± 1.00".into(),
            }
        );
        assert_eq!(CellView::from_stat(None), CellView::NoData);
        assert_eq!(
            CellView::from_stat(Some(&StageStat::default())),
            CellView::NoData
        );
    }

    #[test]
    fn test_cell_rounds_midpoints_up() {
        let stat = StageStat {
            sample_count: 8,
            mean: Some(0.125),
            std_deviation: Some(2.5),
        };
        assert_eq!(
            CellView::from_stat(Some(&stat)),
            CellView::Data {
                sample_count: 8,
                mean: "0.13".into(),
                std_deviation: "± 2.50".into(),
            }
        );
    }

    #[test]
    fn test_missing_mean_renders_as_zero() {
        let stat = StageStat {
            sample_count: 2,
            mean: None,
            std_deviation: None,
        };
        assert!(matches!(
            CellView::from_stat(Some(&stat)),
            CellView::Data { ref mean, ref std_deviation, .. } if mean == "0.00" && std_deviation == "± 0.00"
        ));
    }

    #[test]
    fn test_table_view_rows_and_summary() {
        let view = TableView::from_viewer(&viewer());
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.summary_line(), "2 of 2");
        let il6 = view.rows.iter().find(|r| r.name == "IL-6").unwrap();
        assert!(matches!(il6.cells[0], CellView::Data { sample_count: 10, .. }));
        assert!(il6.cells[1..].iter().all(|c| *c == CellView::NoData));
    }

    #[test]
    fn test_html_escapes_names() {
        let mut html = HtmlTable::default();
        html.render(&TableView::from_viewer(&viewer()));
        assert!(html.body.contains("&lt;b&gt;IL-10&lt;/b&gt;"));
        assert!(!html.body.contains("<b>"));
        assert_eq!(html.body.lines().count(), 2);
        assert_eq!(html.info, "Cytokines shown: 2 of 2");
    }

    #[test]
    fn test_html_data_cell() {
        let mut v = viewer();
        v.apply(ViewState {
            filter_text: "IL-6".into(),
            ..ViewState::default()
        });
        let mut html = HtmlTable::default();
        html.render(&TableView::from_viewer(&v));
        assert!(html.body.contains("n = 10"));
        assert!(html.body.contains(">5.00<"));
        assert!(html.body.contains("± 1.00"));
        assert_eq!(html.body.matches(NO_DATA).count(), 4);
        assert!(html.body.contains(r#"href="cytokine_detail.html?cytokine=IL-6""#));
    }

    #[test]
    fn test_empty_result_renders_one_row() {
        let mut v = viewer();
        v.apply(ViewState {
            min_samples: 100,
            ..ViewState::default()
        });
        let view = TableView::from_viewer(&v);
        assert_eq!(view.summary_line(), "0");

        let mut html = HtmlTable::default();
        html.render(&view);
        assert_eq!(html.body.lines().count(), 1);
        assert!(html.body.contains(NO_MATCHES));
        assert_eq!(html.info, "Cytokines shown: 0");
    }

    #[test]
    fn test_error_renders_one_row() {
        let mut html = HtmlTable::default();
        html.render(&TableView::from_viewer(&viewer()));
        html.render_error("Failed to load data.");
        assert_eq!(html.body.lines().count(), 1);
        assert!(html.body.contains("error-row"));
        assert!(html.info.is_empty());
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("IL-6"), "IL-6");
        assert_eq!(encode_uri_component("TNF α"), "TNF%20%CE%B1");
        assert_eq!(encode_uri_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_uri_component("(x)!*'~"), "(x)!*'~");
        assert_eq!(detail_url("IL 1β"), "cytokine_detail.html?cytokine=IL%201%CE%B2");
    }
}
