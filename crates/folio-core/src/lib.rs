//! Folio: Core library.
//! Project records, the showcased-project catalog, the GitHub reconciler and page rendering.

pub mod catalog;
pub mod github;
pub mod pages;
pub mod portfolio;
pub mod project;
pub mod reconcile;

pub use catalog::{Catalog, CatalogError};
pub use github::{
    CachedDirectory, DirectoryError, GithubDirectory, RemoteRepository, RepositoryDirectory, CACHE_TTL,
};
pub use pages::{html_escape, project_card, render_home, render_not_found, render_project};
pub use portfolio::{Portfolio, PortfolioError, SiteProfile};
pub use project::{ProjectOverride, ProjectRecord};
pub use reconcile::{reconcile, Reconciler};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
