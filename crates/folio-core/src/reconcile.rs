//! Repository Data Reconciler.
//!
//! Merges three sources keyed by project name: the live GitHub listing, the local
//! fallback table and the local override table. The result always holds exactly
//! one record per priority name, in priority order. Remote failures of any kind
//! degrade to the fallback table and are never surfaced to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::github::{RemoteRepository, RepositoryDirectory};
use crate::project::ProjectRecord;

/// Pure merge step. `remote` is `None` when the listing could not be obtained.
///
/// 1. keep remote entries whose name is in the priority list (first occurrence wins),
/// 2. fill every uncovered priority name from the fallback table,
/// 3. apply the override for each name,
/// 4. order by priority rank.
pub fn reconcile(remote: Option<Vec<RemoteRepository>>, catalog: &Catalog) -> Vec<ProjectRecord> {
    let mut found: HashMap<String, ProjectRecord> = HashMap::with_capacity(catalog.len());
    for repo in remote.unwrap_or_default() {
        if catalog.contains(&repo.name) && !found.contains_key(&repo.name) {
            found.insert(repo.name.clone(), ProjectRecord::from_remote(repo));
        }
    }

    let mut records: Vec<(usize, ProjectRecord)> = catalog
        .priority()
        .iter()
        .filter_map(|name| {
            let base = match found.remove(name) {
                Some(r) => r,
                None => catalog.fallback_for(name)?.clone(),
            };
            let merged = match catalog.override_for(name) {
                Some(ov) => ov.apply(base),
                None => base,
            };
            let rank = catalog.rank(name)?;
            Some((rank, merged))
        })
        .collect();

    records.sort_by_key(|(rank, _)| *rank);
    records.into_iter().map(|(_, r)| r).collect()
}

/// Reconciler bound to one directory and one catalog. Cheap to clone; share across requests.
#[derive(Clone)]
pub struct Reconciler {
    directory: Arc<dyn RepositoryDirectory>,
    catalog: Arc<Catalog>,
}

impl Reconciler {
    pub fn new(directory: Arc<dyn RepositoryDirectory>, catalog: Arc<Catalog>) -> Self {
        Self { directory, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ordered project list for `account`. Never fails; see module docs.
    pub async fn fetch_projects(&self, account: &str) -> Vec<ProjectRecord> {
        let remote = match self.directory.list_repositories(account).await {
            Ok(repos) => Some(repos),
            Err(e) => {
                tracing::warn!(account, error = %e, "GitHub listing unavailable, using fallback data");
                None
            }
        };
        let projects = reconcile(remote, &self.catalog);
        tracing::debug!(account, count = projects.len(), "projects reconciled");
        projects
    }

    /// Single project for the detail view. `None` when the name is not showcased.
    pub async fn find_project(&self, account: &str, name: &str) -> Option<ProjectRecord> {
        if !self.catalog.contains(name) {
            return None;
        }
        self.fetch_projects(account)
            .await
            .into_iter()
            .find(|p| p.name == name)
    }
}
