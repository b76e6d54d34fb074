//! HTTP API server for the editing surface.
//!
//! Provides REST endpoints for article fetching, script generation, narration,
//! stateless timeline edits and project storage.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::StoryreelError;
use crate::narration::NarrationRequest;
use crate::orchestrator::Orchestrator;
use crate::project::{templates, NewProject};
use crate::script::ScriptRequest;
use crate::timeline::{Scene, SceneEdit, SceneLayout, Timeline, TimelineResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use uuid::Uuid;

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let state = Arc::new(AppState { orchestrator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/article", post(fetch_article))
        .route("/script", post(generate_script))
        .route("/narration", post(synthesize_narration))
        .route("/timeline/edit", post(edit_timeline))
        .route("/timeline/layout", post(layout_timeline))
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/templates", get(list_templates))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Storyreel API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Article", "POST /article");
    Output::kv("Script", "POST /script");
    Output::kv("Narration", "POST /narration");
    Output::kv("Edit Timeline", "POST /timeline/edit");
    Output::kv("Layout", "POST /timeline/layout");
    Output::kv("Projects", "GET  /projects, POST /projects");
    Output::kv("Project", "GET|PUT|DELETE /projects/:id");
    Output::kv("Templates", "GET  /templates");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ArticleRequest {
    url: String,
}

#[derive(Deserialize)]
struct TimelineEditRequest {
    scenes: Vec<Scene>,
    edit: SceneEdit,
}

#[derive(Deserialize)]
struct LayoutRequest {
    scenes: Vec<Scene>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineResponse {
    scenes: Vec<Scene>,
    total_duration: f64,
    layout: Vec<SceneLayout>,
}

impl From<Timeline> for TimelineResponse {
    fn from(timeline: Timeline) -> Self {
        Self {
            total_duration: timeline.total_duration(),
            layout: timeline.layout(),
            scenes: timeline.into_scenes(),
        }
    }
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

// === Error mapping ===

fn error_status(error: &StoryreelError) -> StatusCode {
    match error {
        StoryreelError::InvalidUrl(_)
        | StoryreelError::ArticleNotFound(_)
        | StoryreelError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StoryreelError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        StoryreelError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
        StoryreelError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
        StoryreelError::Timeline(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_code(error: &StoryreelError) -> Option<&'static str> {
    match error {
        StoryreelError::Timeline(e) => Some(e.code()),
        StoryreelError::InvalidUrl(_) => Some("invalid_url"),
        StoryreelError::ArticleNotFound(_) => Some("article_not_found"),
        StoryreelError::RateLimited => Some("rate_limited"),
        StoryreelError::QuotaExhausted => Some("quota_exhausted"),
        StoryreelError::ProjectNotFound(_) => Some("project_not_found"),
        _ => None,
    }
}

fn error_response(error: StoryreelError) -> Response {
    let status = error_status(&error);
    if status.is_server_error() {
        warn!("Request failed: {}", error);
    }
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code: error_code(&error),
        }),
    )
        .into_response()
}

fn apply_timeline_edit(request: TimelineEditRequest) -> TimelineResult<TimelineResponse> {
    let timeline = Timeline::from_scenes(request.scenes)?;
    Ok(request.edit.apply(&timeline)?.into())
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn fetch_article(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArticleRequest>,
) -> impl IntoResponse {
    match state.orchestrator.fetcher().fetch(&req.url).await {
        Ok(article) => Json(article).into_response(),
        Err(e) => error_response(e),
    }
}

async fn generate_script(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScriptRequest>,
) -> impl IntoResponse {
    match state.orchestrator.generator().generate(&req).await {
        Ok(script) => Json(script).into_response(),
        Err(e) => error_response(e),
    }
}

async fn synthesize_narration(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NarrationRequest>,
) -> impl IntoResponse {
    match state.orchestrator.synthesizer().synthesize(&req).await {
        Ok(narration) => Json(narration).into_response(),
        Err(e) => error_response(e),
    }
}

async fn edit_timeline(Json(req): Json<TimelineEditRequest>) -> impl IntoResponse {
    match apply_timeline_edit(req) {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(e.into()),
    }
}

async fn layout_timeline(Json(req): Json<LayoutRequest>) -> impl IntoResponse {
    match Timeline::from_scenes(req.scenes) {
        Ok(timeline) => Json(TimelineResponse::from(timeline)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let limit = query
        .limit
        .unwrap_or(state.orchestrator.settings().store.page_size);

    match state.orchestrator.store().list(limit).await {
        Ok(projects) => Json(serde_json::json!({
            "total": projects.len(),
            "projects": projects,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewProject>,
) -> impl IntoResponse {
    match state.orchestrator.store().create(req).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.orchestrator.store().get(&id).await {
        Ok(Some(project)) => Json(project).into_response(),
        Ok(None) => error_response(StoryreelError::ProjectNotFound(id.to_string())),
        Err(e) => error_response(e),
    }
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewProject>,
) -> impl IntoResponse {
    match state.orchestrator.store().update(&id, req).await {
        Ok(project) => Json(project).into_response(),
        Err(e) => error_response(e),
    }
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.orchestrator.store().delete(&id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(StoryreelError::ProjectNotFound(id.to_string())),
        Err(e) => error_response(e),
    }
}

async fn list_templates() -> impl IntoResponse {
    Json(templates())
}
