//! ProjectRecord: one showcased project, plus the partial override applied over it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::RemoteRepository;

/// Number of topic badges shown on a summary card.
pub const CARD_TOPIC_LIMIT: usize = 3;

fn default_updated_at() -> DateTime<Utc> {
    Utc::now()
}

/// Reconciled data for one project. `name` is the join key across remote, fallback and override data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Fallback records without a timestamp get the load time.
    #[serde(default = "default_updated_at")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl ProjectRecord {
    /// Record built from the GitHub listing; presentation fields stay empty until an override lands.
    pub fn from_remote(remote: RemoteRepository) -> Self {
        Self {
            id: remote.id,
            name: remote.name,
            description: remote.description.filter(|d| !d.trim().is_empty()),
            detailed_description: None,
            html_url: remote.html_url,
            homepage: remote.homepage.filter(|h| !h.trim().is_empty()),
            stars: remote.stargazers_count,
            forks: remote.forks_count,
            topics: remote.topics,
            language: remote.language,
            updated_at: remote.updated_at,
            custom_title: None,
            image: None,
            features: Vec::new(),
        }
    }

    pub fn display_title(&self) -> &str {
        self.custom_title.as_deref().unwrap_or(&self.name)
    }

    /// Topics for the summary card (first three).
    pub fn summary_topics(&self) -> &[String] {
        let n = self.topics.len().min(CARD_TOPIC_LIMIT);
        &self.topics[..n]
    }

    /// Link target for the card title: live demo when there is one, source otherwise.
    pub fn primary_link(&self) -> &str {
        self.homepage.as_deref().unwrap_or(&self.html_url)
    }

    /// Detail route keyed by `name`.
    pub fn detail_path(&self) -> String {
        format!("/projects/{}", self.name)
    }
}

/// Hand-authored partial record. Present fields win over remote or fallback values.
/// Unknown keys are rejected so a misspelled field never silently drops out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectOverride {
    #[serde(default)]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl ProjectOverride {
    /// Shallow merge over `record`. Fields absent from the override keep the record's value.
    pub fn apply(&self, mut record: ProjectRecord) -> ProjectRecord {
        if let Some(v) = &self.custom_title {
            record.custom_title = Some(v.clone());
        }
        if let Some(v) = &self.image {
            record.image = Some(v.clone());
        }
        if let Some(v) = &self.description {
            record.description = Some(v.clone());
        }
        if let Some(v) = &self.detailed_description {
            record.detailed_description = Some(v.clone());
        }
        if let Some(v) = &self.html_url {
            record.html_url = v.clone();
        }
        if let Some(v) = &self.homepage {
            record.homepage = Some(v.clone());
        }
        if let Some(v) = &self.topics {
            record.topics = v.clone();
        }
        if let Some(v) = &self.language {
            record.language = Some(v.clone());
        }
        if let Some(v) = &self.features {
            record.features = v.clone();
        }
        record
    }
}
