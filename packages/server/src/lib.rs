//! # Pamphlet Server
//!
//! Serves published projects as read-only pages.
//!
//! ## Routes
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | project index; forwards `#view/<id>` share links |
//! | `GET /view/:id` | published page |
//! | `GET /api/projects` | project summaries |
//! | `GET /api/projects/:id` | project without its password |
//!
//! Reading never requires the project password.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pamphlet_renderer::{render_published_page, PageOptions};
use pamphlet_schema::{Project, TemplateType};
use pamphlet_storage::{ProjectStore, StorageError};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const NOT_FOUND_MESSAGE: &str = "존재하지 않는 페이지입니다.";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Project not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, Html(not_found_page())).into_response(),
            ServerError::Storage(e) => {
                tracing::error!("Failed to read projects: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable").into_response()
            }
        }
    }
}

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub page: PageOptions,
}

impl AppState {
    pub fn new(store: Arc<dyn ProjectStore>, page: PageOptions) -> Self {
        Self { store, page }
    }

    fn project(&self, id: &str) -> Result<Project, ServerError> {
        self.store
            .get(id)?
            .ok_or_else(|| ServerError::NotFound(id.to_string()))
    }
}

/// Listing entry; never carries the password
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub template: TemplateType,
    pub created_at: i64,
    pub block_count: usize,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            template: project.template,
            created_at: project.created_at,
            block_count: project.blocks.len(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/view/:id", get(view_handler))
        .route("/api/projects", get(list_handler))
        .route("/api/projects/:id", get(project_handler))
        .fallback(|| async { ServerError::NotFound(String::new()) })
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process stops
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving published pages on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn view_handler(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>, ServerError> {
    let project = state.project(&id)?;
    tracing::debug!("Rendering published page for {}", id);
    Ok(Html(render_published_page(&project, &state.page)))
}

async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<ProjectSummary>>, ServerError> {
    let mut projects = state.store.list()?;
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(projects.iter().map(ProjectSummary::from).collect()))
}

async fn project_handler(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Project>, ServerError> {
    Ok(Json(state.project(&id)?.redacted()))
}

async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let mut projects = state.store.list()?;
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let items: String = projects
        .iter()
        .map(|p| {
            format!(
                "<li><a href=\"/view/{}\">{}</a> <small>{}</small></li>",
                escape(&p.id),
                escape(&p.title),
                p.template.label()
            )
        })
        .collect();

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>Pamphlet</title></head>
<body>
<script>
var m = location.hash.match(/^#view\/(.+)$/);
if (m) {{ location.replace("/view/" + encodeURIComponent(m[1])); }}
</script>
<h1>Pamphlet</h1>
<ul>{}</ul>
</body>
</html>"#,
        items
    )))
}

fn not_found_page() -> String {
    format!(
        "<!DOCTYPE html><html lang=\"ko\"><head><meta charset=\"utf-8\"><title>404</title></head>\
         <body><p>{}</p></body></html>",
        NOT_FOUND_MESSAGE
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
