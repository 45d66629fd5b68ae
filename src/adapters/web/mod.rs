//! Web server adapter.
//!
//! Axum server with an HTMX sidebar: the selected page label arrives as the
//! `page` query parameter and every request re-renders that page from the
//! memoized dataset.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::domain::dataset::DatasetProvider;
use crate::domain::settings::PageSettings;

pub struct AppState {
    pub dataset: Arc<DatasetProvider>,
    pub page: PageSettings,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/page", get(handlers::page_json))
        .fallback(handlers::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(Arc::new(state))
}

/// HTMX swaps want the content fragment, except history restores after a
/// cache miss, which replace the whole document.
fn wants_fragment(headers: &axum::http::HeaderMap) -> bool {
    headers.contains_key("HX-Request") && !headers.contains_key("HX-History-Restore-Request")
}
