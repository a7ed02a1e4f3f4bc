//! Portfolio content: site profile plus the project catalog, loaded from TOML.
//! A default copy is bundled via include_str! so the gateway runs with no external files.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogError};
use crate::project::{ProjectOverride, ProjectRecord};

const BUNDLED_PORTFOLIO: &str = include_str!("../assets/portfolio.toml");

/// Owner identity and static page copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteProfile {
    /// GitHub login whose repositories are listed.
    pub account: String,
    pub display_name: String,
    #[serde(default)]
    pub greeting: Option<String>,
    pub tagline: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub github_url: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("portfolio file: {0}")]
    Io(#[from] std::io::Error),
    #[error("portfolio parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("portfolio catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("portfolio profile: account is empty")]
    EmptyAccount,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PortfolioFile {
    priority: Vec<String>,
    profile: SiteProfile,
    #[serde(default)]
    fallback: Vec<ProjectRecord>,
    #[serde(default)]
    overrides: HashMap<String, ProjectOverride>,
}

#[derive(Debug, Clone)]
pub struct Portfolio {
    pub profile: SiteProfile,
    pub catalog: Catalog,
}

impl Portfolio {
    /// The content shipped with the binary.
    pub fn bundled() -> Result<Self, PortfolioError> {
        Self::from_toml_str(BUNDLED_PORTFOLIO)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PortfolioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, PortfolioError> {
        let file: PortfolioFile = toml::from_str(s)?;
        if file.profile.account.trim().is_empty() {
            return Err(PortfolioError::EmptyAccount);
        }
        let catalog = Catalog::new(file.priority, file.fallback, file.overrides)?;
        Ok(Self {
            profile: file.profile,
            catalog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_portfolio_is_valid() {
        let p = Portfolio::bundled().unwrap();
        assert_eq!(p.profile.account, "MrBiscuit921");
        assert_eq!(
            p.catalog.priority(),
            &["race-stint-calculator", "transition-flow", "timezone-to-image"]
        );
        let fb = p.catalog.fallback_for("transition-flow").unwrap();
        assert_eq!(fb.stars, 0);
        assert_eq!(fb.forks, 0);
        let ov = p.catalog.override_for("transition-flow").unwrap();
        assert_eq!(ov.custom_title.as_deref(), Some("Spotify Transitions"));
        assert_eq!(ov.features.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn invalid_catalog_is_reported() {
        let s = r#"
priority = ["a", "b"]
[profile]
account = "u"
display_name = "U"
tagline = "t"
github_url = "https://github.com/u"
[[fallback]]
id = 1
name = "a"
html_url = "https://github.com/u/a"
"#;
        let err = Portfolio::from_toml_str(s).unwrap_err();
        assert!(matches!(err, PortfolioError::Catalog(CatalogError::MissingFallback(ref n)) if n == "b"));
    }

    #[test]
    fn blank_account_rejected() {
        let s = r#"
priority = ["a"]
[profile]
account = "  "
display_name = "U"
tagline = "t"
github_url = "https://github.com/u"
[[fallback]]
id = 1
name = "a"
html_url = "https://github.com/u/a"
"#;
        assert!(matches!(Portfolio::from_toml_str(s), Err(PortfolioError::EmptyAccount)));
    }

    const MINIMAL_HEAD: &str = r#"
priority = ["a"]
[profile]
account = "u"
display_name = "U"
tagline = "t"
github_url = "https://github.com/u"
"#;

    #[test]
    fn misspelled_override_key_rejected() {
        let s = format!(
            "{}{}",
            MINIMAL_HEAD,
            r#"
[[fallback]]
id = 1
name = "a"
html_url = "https://github.com/u/a"
[overrides.a]
customTitle = "Pretty A"
"#
        );
        assert!(matches!(Portfolio::from_toml_str(&s), Err(PortfolioError::Parse(_))));

        let counts = format!(
            "{}{}",
            MINIMAL_HEAD,
            r#"
[[fallback]]
id = 1
name = "a"
html_url = "https://github.com/u/a"
[overrides.a]
stars = 9
"#
        );
        assert!(matches!(Portfolio::from_toml_str(&counts), Err(PortfolioError::Parse(_))));
    }

    #[test]
    fn remote_style_fallback_key_rejected() {
        let s = format!(
            "{}{}",
            MINIMAL_HEAD,
            r#"
[[fallback]]
id = 1
name = "a"
html_url = "https://github.com/u/a"
stargazers_count = 42
"#
        );
        assert!(matches!(Portfolio::from_toml_str(&s), Err(PortfolioError::Parse(_))));
    }

    #[test]
    fn override_with_known_keys_reaches_catalog() {
        let s = format!(
            "{}{}",
            MINIMAL_HEAD,
            r#"
[[fallback]]
id = 1
name = "a"
html_url = "https://github.com/u/a"
stars = 42
[overrides.a]
custom_title = "Pretty A"
"#
        );
        let p = Portfolio::from_toml_str(&s).unwrap();
        assert_eq!(p.catalog.fallback_for("a").unwrap().stars, 42);
        assert_eq!(
            p.catalog.override_for("a").unwrap().custom_title.as_deref(),
            Some("Pretty A")
        );
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        std::fs::write(&path, BUNDLED_PORTFOLIO).unwrap();
        let p = Portfolio::from_path(&path).unwrap();
        assert_eq!(p.catalog.len(), 3);
        assert!(matches!(
            Portfolio::from_path(dir.path().join("missing.toml")),
            Err(PortfolioError::Io(_))
        ));
    }
}
