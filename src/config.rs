//! Configuration loading.
//!
//! Read from a JSON file; every field has a default so a partial file or no
//! file at all still gives a working setup:
//!
//! 1. `--config <PATH>` (must exist)
//! 2. `<config_dir>/flagkit/config.json` if present
//! 3. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::flags::{FlagError, FlagResolver, DEFAULT_CDN_BASE};

const APP_DIR: &str = "flagkit";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("flag CDN {0} is not in the remote image allow-list")]
    UntrustedCdn(String),

    #[error(transparent)]
    Flag(#[from] FlagError),
}

/// One trusted remote image source.
///
/// `hostname` may start with `*.` to match any subdomain. `pathname` may end
/// with `**` to match everything below a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteImageHost {
    #[serde(default = "default_protocol")]
    pub protocol: String,
    pub hostname: String,
    #[serde(default = "default_pathname")]
    pub pathname: String,
}

fn default_protocol() -> String {
    "https".to_string()
}

fn default_pathname() -> String {
    "/**".to_string()
}

impl RemoteImageHost {
    pub fn new(protocol: &str, hostname: &str, pathname: &str) -> Self {
        Self {
            protocol: protocol.to_string(),
            hostname: hostname.to_string(),
            pathname: pathname.to_string(),
        }
    }

    /// Check whether an absolute URL is covered by this entry.
    ///
    /// The URL is parsed, so user-info and ports never count as the host.
    pub fn matches(&self, url: &str) -> bool {
        let Ok(url) = Url::parse(url.trim()) else {
            return false;
        };
        if !url.scheme().eq_ignore_ascii_case(&self.protocol) {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };

        self.host_matches(host) && self.path_matches(url.path())
    }

    fn host_matches(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        let pattern = self.hostname.to_ascii_lowercase();
        match pattern.strip_prefix("*.") {
            Some(suffix) => host
                .strip_suffix(suffix)
                .and_then(|sub| sub.strip_suffix('.'))
                .is_some_and(|sub| !sub.is_empty()),
            None => host == pattern,
        }
    }

    fn path_matches(&self, path: &str) -> bool {
        match self.pathname.strip_suffix("**") {
            Some(prefix) => path.starts_with(prefix),
            None => path == self.pathname,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Flag CDN base URL, e.g. `https://flagcdn.com`
    pub flag_cdn_base: String,
    /// Public site URL used for the crawler policy sitemap
    pub site_url: String,
    pub remote_image_hosts: Vec<RemoteImageHost>,
    /// Where the developer auth token lives (None = default data dir location)
    pub token_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flag_cdn_base: DEFAULT_CDN_BASE.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            remote_image_hosts: vec![RemoteImageHost::new("https", "flagcdn.com", "/**")],
            token_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if it exists, otherwise defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Check the config is internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let resolver = FlagResolver::new(&self.flag_cdn_base)?;
        // Probe with a concrete asset path so path-scoped entries are honoured.
        let sample = format!("{}/w20/xx.png", resolver.base_url());
        if !self.is_trusted_image(&sample) {
            return Err(ConfigError::UntrustedCdn(self.flag_cdn_base.clone()));
        }
        Ok(())
    }

    pub fn resolver(&self) -> Result<FlagResolver, ConfigError> {
        Ok(FlagResolver::new(&self.flag_cdn_base)?)
    }

    pub fn is_trusted_image(&self, url: &str) -> bool {
        self.remote_image_hosts.iter().any(|host| host.matches(url))
    }

    /// Token file location, falling back to `<data_dir>/flagkit/auth_token`.
    pub fn token_path(&self) -> PathBuf {
        self.token_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join("auth_token")
        })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("logs")
}
