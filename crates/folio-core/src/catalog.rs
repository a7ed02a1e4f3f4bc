//! Catalog: the priority list plus the local fallback and override tables.
//!
//! The priority list decides which projects are shown and in what order. Every
//! priority name must have a complete fallback record so the reconciler can always
//! cover it; overrides are optional per name.

use std::collections::HashMap;

use crate::project::{ProjectOverride, ProjectRecord};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("priority list is empty")]
    EmptyPriority,
    #[error("project name is not a single URL/path segment: {0:?}")]
    InvalidName(String),
    #[error("project listed twice in priority list: {0}")]
    DuplicatePriority(String),
    #[error("no fallback record for priority project: {0}")]
    MissingFallback(String),
    #[error("fallback record defined twice: {0}")]
    DuplicateFallback(String),
    #[error("fallback record not in priority list: {0}")]
    UnlistedFallback(String),
    #[error("override for project not in priority list: {0}")]
    UnknownOverride(String),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    priority: Vec<String>,
    ranks: HashMap<String, usize>,
    fallback: HashMap<String, ProjectRecord>,
    overrides: HashMap<String, ProjectOverride>,
}

impl Catalog {
    pub fn new(
        priority: Vec<String>,
        fallback: Vec<ProjectRecord>,
        overrides: HashMap<String, ProjectOverride>,
    ) -> Result<Self, CatalogError> {
        if priority.is_empty() {
            return Err(CatalogError::EmptyPriority);
        }

        let mut ranks = HashMap::with_capacity(priority.len());
        for (idx, name) in priority.iter().enumerate() {
            if !is_repository_name(name) {
                return Err(CatalogError::InvalidName(name.clone()));
            }
            if ranks.insert(name.clone(), idx).is_some() {
                return Err(CatalogError::DuplicatePriority(name.clone()));
            }
        }

        let mut by_name = HashMap::with_capacity(fallback.len());
        for record in fallback {
            if !ranks.contains_key(&record.name) {
                return Err(CatalogError::UnlistedFallback(record.name));
            }
            if by_name.contains_key(&record.name) {
                return Err(CatalogError::DuplicateFallback(record.name));
            }
            by_name.insert(record.name.clone(), record);
        }

        if let Some(missing) = priority.iter().find(|n| !by_name.contains_key(*n)) {
            return Err(CatalogError::MissingFallback(missing.clone()));
        }

        if let Some(unknown) = overrides.keys().find(|k| !ranks.contains_key(*k)) {
            return Err(CatalogError::UnknownOverride(unknown.clone()));
        }

        Ok(Self {
            priority,
            ranks,
            fallback: by_name,
            overrides,
        })
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Position in the priority list (precomputed once at construction).
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    pub fn fallback_for(&self, name: &str) -> Option<&ProjectRecord> {
        self.fallback.get(name)
    }

    pub fn override_for(&self, name: &str) -> Option<&ProjectOverride> {
        self.overrides.get(name)
    }

    pub fn len(&self) -> usize {
        self.priority.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_empty()
    }
}

/// Repository names: ASCII alphanumerics, `-`, `_` and `.`, never `.` or `..` alone.
/// Names double as the `/projects/{name}` slug and the export directory.
fn is_repository_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
