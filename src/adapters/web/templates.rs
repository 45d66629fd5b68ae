//! HTML templates using Askama.

use askama::Template;

use crate::domain::pages::{Block, DataTable, Page, PageView};
use crate::domain::settings::PageSettings;

pub struct SidebarOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Sidebar entries in display order, marking `selected` when it matches.
pub fn sidebar_options(selected: &str) -> Vec<SidebarOption> {
    Page::ALL
        .into_iter()
        .map(|p| SidebarOption {
            label: p.label(),
            selected: p.label() == selected,
        })
        .collect()
}

/// A page block ready for the template: charts are pre-serialized.
pub enum ContentBlock {
    Header(String),
    Subheader(String),
    Text(String),
    Link(String, String),
    Table(DataTable),
    Chart(String, String),
    Code(&'static str, String),
    Error(String),
}

impl ContentBlock {
    pub fn from_view(view: &PageView) -> Result<Vec<ContentBlock>, serde_json::Error> {
        let mut charts = 0usize;
        view.blocks
            .iter()
            .map(|block| -> Result<ContentBlock, serde_json::Error> {
                Ok(match block {
                    Block::Header { text } => ContentBlock::Header(text.clone()),
                    Block::Subheader { text } => ContentBlock::Subheader(text.clone()),
                    Block::Text { text } => ContentBlock::Text(text.clone()),
                    Block::Link { text, href } => ContentBlock::Link(text.clone(), href.clone()),
                    Block::Table { table } => ContentBlock::Table(table.clone()),
                    Block::Chart { spec } => {
                        charts += 1;
                        // Inlined in a <script> element, so "</" must not appear verbatim.
                        let json = spec.to_json()?.replace("</", "<\\/");
                        ContentBlock::Chart(format!("chart-{charts}"), json)
                    }
                    Block::Code { language, source } => ContentBlock::Code(*language, source.clone()),
                    Block::Error { text } => ContentBlock::Error(text.clone()),
                })
            })
            .collect()
    }
}

/// Full document: layout, sidebar and content.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub app_title: &'a str,
    pub title: &'a str,
    pub wide: bool,
    pub sidebar_expanded: bool,
    pub options: Vec<SidebarOption>,
    /// The requested label when it matches no sidebar entry.
    pub unknown_label: Option<&'a str>,
    pub blocks: Vec<ContentBlock>,
}

impl<'a> PageTemplate<'a> {
    pub fn new(
        settings: &'a PageSettings,
        selected: &'a str,
        view: &'a PageView,
    ) -> Result<Self, serde_json::Error> {
        let options = sidebar_options(selected);
        let unknown_label = (!options.iter().any(|o| o.selected)).then_some(selected);
        Ok(Self {
            app_title: &settings.title,
            title: &view.title,
            wide: settings.is_wide(),
            sidebar_expanded: settings.sidebar_expanded(),
            options,
            unknown_label,
            blocks: ContentBlock::from_view(view)?,
        })
    }
}

/// Content only, swapped into `#content` by HTMX.
#[derive(Template)]
#[template(path = "content.html")]
pub struct ContentTemplate {
    pub blocks: Vec<ContentBlock>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
