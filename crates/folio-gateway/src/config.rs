//! Gateway configuration. Precedence: env `FOLIO__*` > `FOLIO_CONFIG` file (default `config/folio.toml`) > defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | host | 127.0.0.1 | Bind address. |
//! | port | 8000 | HTTP port. |
//! | github_api_url | https://api.github.com | GitHub REST base URL. |
//! | github_token | (none) | Optional token for a higher rate limit. |
//! | cache_ttl_secs | 3600 | Freshness window for cached listings; 0 disables the cache. |
//! | portfolio_path | (none) | Site content TOML; bundled content when unset. |
//! | images_dir | ./public/images | Served under `/images`. |
//! | account | (none) | Overrides the profile's GitHub account. |

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub github_api_url: String,
    #[serde(default)]
    pub github_token: Option<String>,
    pub cache_ttl_secs: u64,
    #[serde(default)]
    pub portfolio_path: Option<String>,
    pub images_dir: String,
    #[serde(default)]
    pub account: Option<String>,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("FOLIO_CONFIG").unwrap_or_else(|_| "config/folio.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8000_i64)?
            .set_default("github_api_url", folio_core::github::DEFAULT_API_URL)?
            .set_default("cache_ttl_secs", 3600_i64)?
            .set_default("images_dir", "./public/images")?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        builder
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GatewayConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.github_api_url, "https://api.github.com");
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(3600));
        assert!(cfg.portfolio_path.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "port = 9123\ncache_ttl_secs = 0\naccount = \"someone\"\n").unwrap();
        let cfg = GatewayConfig::load_from(&path).unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9123");
        assert_eq!(cfg.cache_ttl(), Duration::ZERO);
        assert_eq!(cfg.account.as_deref(), Some("someone"));
    }
}
