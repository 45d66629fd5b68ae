//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::pages::{Page, PageView, render_page};

use super::{AppState, WebError, wants_fragment};

#[derive(Debug, Default, serde::Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// The selected label; the first sidebar entry when nothing was chosen.
    pub fn label(&self) -> &str {
        self.page.as_deref().unwrap_or(Page::Top.label())
    }
}

fn render_view(state: &AppState, label: &str) -> Result<PageView, WebError> {
    let rows = state.dataset.rows()?;
    Ok(render_page(label, &rows))
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    let label = query.label();
    let view = render_view(&state, label)?;

    if wants_fragment(&headers) {
        let template = super::templates::ContentTemplate {
            blocks: super::templates::ContentBlock::from_view(&view)
                .map_err(|e| WebError::internal(e.to_string()))?,
        };
        Ok(Html(template.render()?).into_response())
    } else {
        let template = super::templates::PageTemplate::new(&state.page, label, &view)
            .map_err(|e| WebError::internal(e.to_string()))?;
        Ok(Html(template.render()?).into_response())
    }
}

pub async fn page_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageView>, WebError> {
    Ok(Json(render_view(&state, query.label())?))
}

pub async fn not_found() -> WebError {
    WebError::not_found("page not found")
}
