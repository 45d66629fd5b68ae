//! Page selection and the content of each demo page.
//!
//! [`render_page`] is a flat dispatch from a sidebar label to one render
//! function. Unknown labels yield a page holding only [`FALLBACK_ERROR`].

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::chart::ChartSpec;
use crate::domain::chart_builders::{self, ChartExample};
use crate::domain::dataset::DatasetSummary;
use crate::domain::snippets;
use crate::domain::stock_row::StockRow;

pub const FALLBACK_ERROR: &str = "Error";

pub const APP_TITLE: &str = "Example Line Charts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Top,
    SampleData,
    SimpleLine,
    LegendSelection,
    HoverTooltip,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 5] = [
        Page::Top,
        Page::SampleData,
        Page::SimpleLine,
        Page::LegendSelection,
        Page::HoverTooltip,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Top => "Top",
            Page::SampleData => "Sample data",
            Page::SimpleLine => "Simple line chart",
            Page::LegendSelection => "Select series via legend",
            Page::HoverTooltip => "Hover marker and tooltip",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Page::Top => "top",
            Page::SampleData => "sample-data",
            Page::SimpleLine => "simple-line",
            Page::LegendSelection => "legend-selection",
            Page::HoverTooltip => "hover-tooltip",
        }
    }

    pub fn from_label(label: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.label() == label)
    }

    pub fn from_slug(slug: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.slug() == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<[String; 3]>,
}

impl DataTable {
    fn of(rows: &[StockRow]) -> Self {
        Self {
            columns: vec!["date", "symbol", "price"],
            rows: rows
                .iter()
                .map(|r| [r.date.to_string(), r.symbol.clone(), r.price.to_string()])
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Header { text: String },
    Subheader { text: String },
    Text { text: String },
    Link { text: String, href: String },
    Table { table: DataTable },
    Chart { spec: ChartSpec },
    Code { language: &'static str, source: String },
    Error { text: String },
}

impl Block {
    fn header(text: &str) -> Self {
        Block::Header { text: text.into() }
    }

    fn subheader(text: &str) -> Self {
        Block::Subheader { text: text.into() }
    }

    fn text(text: &str) -> Self {
        Block::Text { text: text.into() }
    }

    fn code(language: &'static str, source: &str) -> Self {
        Block::Code {
            language,
            source: source.into(),
        }
    }
}

/// Everything needed to draw one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub title: String,
    /// `None` when the requested label was not recognised.
    pub page: Option<Page>,
    pub blocks: Vec<Block>,
}

impl PageView {
    fn new(page: Page, blocks: Vec<Block>) -> Self {
        Self {
            title: page.label().to_string(),
            page: Some(page),
            blocks,
        }
    }

    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_ERROR.to_string(),
            page: None,
            blocks: vec![Block::Error {
                text: FALLBACK_ERROR.to_string(),
            }],
        }
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Chart { spec } => Some(spec),
            _ => None,
        })
    }
}

pub fn render_page(label: &str, source: &Arc<Vec<StockRow>>) -> PageView {
    match Page::from_label(label) {
        Some(page) => render(page, source),
        None => {
            tracing::warn!(label, "unknown page selection");
            PageView::fallback()
        }
    }
}

pub fn render(page: Page, source: &Arc<Vec<StockRow>>) -> PageView {
    tracing::debug!(page = page.slug(), rows = source.len(), "rendering page");
    match page {
        Page::Top => page_top(),
        Page::SampleData => page_sample_data(source),
        Page::SimpleLine => page_simple_line(source),
        Page::LegendSelection => page_legend_selection(source),
        Page::HoverTooltip => page_hover_tooltip(source),
    }
}

fn push_example(blocks: &mut Vec<Block>, example: ChartExample) {
    blocks.push(Block::Chart { spec: example.spec });
    blocks.push(Block::code("rust", example.snippet));
}

fn page_top() -> PageView {
    let blocks = vec![
        Block::header(APP_TITLE),
        Block::text("This demo shows how to draw line charts with a declarative chart specification."),
        Block::text(
            "Each page pairs a live chart with the code that builds it, from a plain line chart up to \
             legend-driven highlighting and hover tooltips.",
        ),
        Block::Link {
            text: "Vega-Lite documentation".into(),
            href: "https://vega.github.io/vega-lite/docs/".into(),
        },
    ];
    PageView::new(Page::Top, blocks)
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

fn page_sample_data(source: &Arc<Vec<StockRow>>) -> PageView {
    let summary = DatasetSummary::of(source);
    let schema = format!(
        "{} rows. Columns: date (date), symbol (string), price (f64). Symbols: {}. Range: {} to {}.",
        summary.row_count,
        summary.symbols.join(", "),
        format_date(summary.first_date),
        format_date(summary.last_date),
    );

    let blocks = vec![
        Block::header("Sample data"),
        Block::text("Monthly stock prices per ticker symbol."),
        Block::Table {
            table: DataTable::of(source),
        },
        Block::text(&schema),
        Block::text("Start the demo against the bundled dataset:"),
        Block::code("bash", snippets::RUN_DEMO),
        Block::text("The dataset is loaded like this:"),
        Block::code("rust", snippets::LOAD_DATASET),
    ];
    PageView::new(Page::SampleData, blocks)
}

fn page_simple_line(source: &Arc<Vec<StockRow>>) -> PageView {
    let mut blocks = vec![Block::header("Simple line chart")];

    let plain = chart_builders::simple_line(source);
    let notes = plain.notes.clone();
    push_example(&mut blocks, plain);
    blocks.extend(notes.into_iter().map(Block::text));
    blocks.push(Block::Link {
        text: "Encoding data types".into(),
        href: "https://vega.github.io/vega-lite/docs/type.html".into(),
    });

    let ordered = chart_builders::simple_line_data_order(source);
    blocks.push(Block::subheader(ordered.title));
    blocks.extend(ordered.notes.iter().copied().map(Block::text));
    push_example(&mut blocks, ordered);

    PageView::new(Page::SimpleLine, blocks)
}

fn page_legend_selection(source: &Arc<Vec<StockRow>>) -> PageView {
    let example = chart_builders::legend_selection(source);
    let mut blocks = vec![Block::header(example.title)];
    blocks.extend(example.notes.iter().copied().map(Block::text));
    push_example(&mut blocks, example);
    PageView::new(Page::LegendSelection, blocks)
}

fn page_hover_tooltip(source: &Arc<Vec<StockRow>>) -> PageView {
    let example = chart_builders::hover_tooltip(source);
    let mut blocks = vec![Block::header(example.title)];
    blocks.extend(example.notes.iter().copied().map(Block::text));
    push_example(&mut blocks, example);
    PageView::new(Page::HoverTooltip, blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Arc<Vec<StockRow>> {
        let d = |m| NaiveDate::from_ymd_opt(2004, m, 1).unwrap();
        Arc::new(vec![
            StockRow::new(d(2), "MSFT", 21.77),
            StockRow::new(d(2), "IBM", 91.74),
        ])
    }

    #[test]
    fn labels_and_slugs_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_label(page.label()), Some(page));
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_label("top"), None);
        assert_eq!(Page::from_slug("Top"), None);
    }

    #[test]
    fn top_page_has_no_chart() {
        let view = render_page("Top", &rows());
        assert_eq!(view.page, Some(Page::Top));
        assert_eq!(view.charts().count(), 0);
    }

    #[test]
    fn sample_data_lists_every_row() {
        let view = render_page("Sample data", &rows());
        let table = view.blocks.iter().find_map(|b| match b {
            Block::Table { table } => Some(table),
            _ => None,
        });
        let table = table.unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], ["2004-02-01".to_string(), "MSFT".into(), "21.77".into()]);
    }

    #[test]
    fn sample_data_summary_mentions_symbols() {
        let view = render_page("Sample data", &rows());
        let summary = view.blocks.iter().any(|b| match b {
            Block::Text { text } => text.contains("Symbols: MSFT, IBM"),
            _ => false,
        });
        assert!(summary);
    }

    #[test]
    fn chart_pages_pair_every_chart_with_code() {
        let expected = [
            (Page::SimpleLine, 2),
            (Page::LegendSelection, 1),
            (Page::HoverTooltip, 1),
        ];
        for (page, charts) in expected {
            let view = render(page, &rows());
            assert_eq!(view.charts().count(), charts, "{:?}", page);
            let code = view
                .blocks
                .iter()
                .filter(|b| matches!(b, Block::Code { language: "rust", .. }))
                .count();
            assert_eq!(code, charts);
        }
    }

    #[test]
    fn unknown_label_falls_back() {
        let view = render_page("Nope", &rows());
        assert_eq!(view, PageView::fallback());
        assert_eq!(
            view.blocks,
            vec![Block::Error {
                text: "Error".into()
            }]
        );
    }

    #[test]
    fn block_serializes_with_kind_tag() {
        let json = serde_json::to_value(Block::code("bash", "ls")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "code", "language": "bash", "source": "ls"})
        );
    }
}
