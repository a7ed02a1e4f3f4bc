//! HTTP routes: landing page, project detail, project JSON and static images.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{Html, Response},
    routing::get,
    Json, Router,
};
use chrono::Datelike;
use folio_core::{render_home, render_not_found, render_project, ProjectRecord, Reconciler, SiteProfile};
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub reconciler: Reconciler,
    pub profile: Arc<SiteProfile>,
    /// GitHub account whose listing feeds the reconciler.
    pub account: String,
}

impl AppState {
    pub async fn projects(&self) -> Vec<ProjectRecord> {
        self.reconciler.fetch_projects(&self.account).await
    }
}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

pub fn router(state: AppState, images_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(home))
        .route("/projects/:slug", get(project_detail))
        .route("/api/projects", get(api_projects))
        .nest_service("/images", ServeDir::new(images_dir))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_request))
}

async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    tracing::info!(%method, %path, status = response.status().as_u16(), "request served");
    response
}

async fn health() -> &'static str {
    "OK"
}

async fn home(State(state): State<AppState>) -> Html<String> {
    let projects = state.projects().await;
    Html(render_home(&state.profile, &projects, current_year()))
}

/// Unknown names are a distinct 404, never an empty page.
async fn project_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    match state.reconciler.find_project(&state.account, &slug).await {
        Some(project) => Ok(Html(render_project(&state.profile, &project, current_year()))),
        None => {
            tracing::info!(slug = %slug, "project not found");
            Err((
                StatusCode::NOT_FOUND,
                Html(render_not_found(&state.profile, &slug, current_year())),
            ))
        }
    }
}

async fn api_projects(State(state): State<AppState>) -> Json<Vec<ProjectRecord>> {
    Json(state.projects().await)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::http::Request;
    use folio_core::{GithubDirectory, Portfolio};
    use tower::ServiceExt;

    /// State whose GitHub endpoint is unreachable, so every request takes the fallback path.
    pub(crate) fn offline_state() -> AppState {
        let portfolio = Portfolio::bundled().unwrap();
        let account = portfolio.profile.account.clone();
        AppState {
            reconciler: Reconciler::new(
                Arc::new(GithubDirectory::new("http://127.0.0.1:9")),
                Arc::new(portfolio.catalog),
            ),
            profile: Arc::new(portfolio.profile),
            account,
        }
    }

    async fn get_body(uri: &str) -> (StatusCode, String) {
        let dir = tempfile::tempdir().unwrap();
        let app = router(offline_state(), dir.path().to_str().unwrap());
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, body) = get_body("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn home_renders_fallback_projects() {
        let (status, body) = get_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Featured Projects"));
        assert!(body.contains("Race Stint Calculator"));
        assert!(body.contains(r#"href="/projects/timezone-to-image""#));
    }

    #[tokio::test]
    async fn known_project_renders_detail() {
        let (status, body) = get_body("/projects/race-stint-calculator").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("About this project"));
        assert!(body.contains("Input for length of the race"));
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let (status, body) = get_body("/projects/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Project not found"));
        assert!(body.contains("does-not-exist"));
    }

    #[tokio::test]
    async fn api_lists_projects_in_priority_order() {
        let (status, body) = get_body("/api/projects").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["race-stint-calculator", "transition-flow", "timezone-to-image"]);
        assert_eq!(json[1]["custom_title"], "Spotify Transitions");
        assert_eq!(json[1]["stars"], 0);
    }
}
