//! Static export: reconcile once and write every page to disk.
//! Layout: `index.html` and `projects/{name}/index.html`.

use std::path::{Path, PathBuf};

use folio_core::{render_home, render_project};

use crate::routes::{current_year, AppState};

/// Writes the site under `out_dir` and returns the paths written.
pub async fn export_site(state: &AppState, out_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let projects = state.projects().await;
    let year = current_year();
    let mut written = Vec::with_capacity(projects.len() + 1);

    tokio::fs::create_dir_all(out_dir).await?;
    let index = out_dir.join("index.html");
    tokio::fs::write(&index, render_home(&state.profile, &projects, year)).await?;
    written.push(index);

    for project in &projects {
        let dir = out_dir.join("projects").join(&project.name);
        tokio::fs::create_dir_all(&dir).await?;
        let page = dir.join("index.html");
        tokio::fs::write(&page, render_project(&state.profile, project, year)).await?;
        written.push(page);
    }

    tracing::info!(pages = written.len(), out = %out_dir.display(), "static site exported");
    Ok(written)
}
