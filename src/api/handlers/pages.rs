//! Static-content page handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value as JsonValue};

use crate::api::AppState;
use crate::config::{Config, NOT_FOUND_TEMPLATE};
use crate::domain::Notice;
use crate::errors::{AppError, AppResult};

/// A page with no logic beyond rendering its template
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub path: &'static str,
    pub template: &'static str,
}

impl Page {
    pub const fn new(path: &'static str, template: &'static str) -> Self {
        Self { path, template }
    }
}

/// Content pages (the contact form has its own handler)
pub const PAGES: &[Page] = &[
    Page::new("/", "home.html"),
    Page::new("/about", "about.html"),
    Page::new("/projects", "projects.html"),
    Page::new("/thesis", "thesis.html"),
    Page::new("/snake", "snake.html"),
    Page::new("/nexa", "nexa.html"),
    Page::new("/teaching", "teaching.html"),
];

/// Create content page routes
pub fn page_routes() -> Router<AppState> {
    PAGES.iter().fold(Router::new(), |router, page| {
        router.route(
            page.path,
            get(move |State(state): State<AppState>| render_page(state, page)),
        )
    })
}

/// Context shared by every template
pub fn page_context(config: &Config, path: &str, notice: Option<Notice>) -> JsonValue {
    json!({
        "lang": config.language.code(),
        "path": path,
        "notice": notice.map(|notice| notice.render(config.language)),
    })
}

async fn render_page(state: AppState, page: &'static Page) -> AppResult<Html<String>> {
    let context = page_context(&state.config, page.path, None);
    let html = state.renderer.render(page.template, &context)?;
    Ok(Html(html))
}

/// Fallback for unknown paths
pub async fn not_found(State(state): State<AppState>, uri: axum::http::Uri) -> Response {
    let context = page_context(&state.config, uri.path(), None);

    match state.renderer.render(NOT_FOUND_TEMPLATE, &context) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Could not render the 404 page");
            AppError::NotFound.into_response()
        }
    }
}
