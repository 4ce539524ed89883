//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the folio.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_true")]
    pub enable_sitemap: bool,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: String,

    #[serde(default)]
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the JSON content collections
    pub data: PathBuf,
    pub output: PathBuf,

    /// Extra static files copied verbatim into the output
    #[serde(default)]
    pub assets: Option<PathBuf>,
}

/// Biography and outbound links shown on the home and about pages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub headline: Option<String>,

    #[serde(default)]
    pub bio: Vec<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,

    #[serde(default)]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Inbox that receives contact-form notifications
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Sender address for outgoing mail
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// Endpoint the contact form posts to
    #[serde(default = "default_contact_endpoint")]
    pub endpoint: String,

    /// Value of Access-Control-Allow-Origin on the contact API
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    #[serde(default)]
    pub relay: RelayConfig,
}

fn default_admin_email() -> String {
    String::from("admin@example.com")
}

fn default_from_email() -> String {
    String::from("noreply@example.com")
}

fn default_contact_endpoint() -> String {
    String::from("/api/contact")
}

fn default_allowed_origin() -> String {
    String::from("*")
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            from_email: default_from_email(),
            endpoint: default_contact_endpoint(),
            allowed_origin: default_allowed_origin(),
            relay: RelayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayKind {
    /// Log messages instead of sending them
    #[default]
    Log,
    /// POST each message as JSON to a hosted mail API
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub kind: RelayKind,

    #[serde(default)]
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            kind: RelayKind::default(),
            endpoint: None,
            api_key_env: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text; paths resolve against the CWD
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Get the content data directory, resolved relative to config file
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.data)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the extra assets directory, if configured
    pub fn assets_dir(&self) -> Option<PathBuf> {
        self.paths.assets.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }

    /// Site name used in email subjects ("example.com" for "https://example.com/blog")
    pub fn website_name(&self) -> String {
        let url = self.site.url.trim();
        let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        without_scheme
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut s = trimmed.to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    if !s.ends_with('/') {
        s.push('/');
    }

    while s.contains("//") {
        s = s.replace("//", "/");
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
site:
  title: "Jane Doe"
  author: "Jane Doe"
  description: "Portfolio"
  url: "https://janedoe.com/"
paths:
  data: "data"
  output: "public"
"#;

    #[test]
    fn test_default_values() {
        let config = Config::from_yaml(MINIMAL).unwrap();

        assert_eq!(config.base_url, "/");
        assert_eq!(config.server.port, 8000);
        assert!(config.enable_sitemap);
        assert_eq!(config.contact.endpoint, "/api/contact");
        assert_eq!(config.contact.allowed_origin, "*");
        assert_eq!(config.contact.relay.kind, RelayKind::Log);
        assert_eq!(config.contact.relay.timeout_secs, 10);
        assert!(config.profile.bio.is_empty());
    }

    #[test]
    fn test_relay_section() {
        let yaml = format!(
            "{}contact:\n  admin_email: me@janedoe.com\n  relay:\n    kind: http\n    endpoint: https://mail.example/send\n    api_key_env: MAIL_KEY\n",
            MINIMAL
        );
        let config = Config::from_yaml(&yaml).unwrap();

        assert_eq!(config.contact.admin_email, "me@janedoe.com");
        assert_eq!(config.contact.from_email, "noreply@example.com");
        assert_eq!(config.contact.relay.kind, RelayKind::Http);
        assert_eq!(
            config.contact.relay.endpoint.as_deref(),
            Some("https://mail.example/send")
        );
        assert_eq!(config.contact.relay.api_key_env.as_deref(), Some("MAIL_KEY"));
    }

    #[test]
    fn test_paths_resolve_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("folio.yml");
        std::fs::write(&config_path, MINIMAL).unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.data_dir(), dir.path().join("data"));
        assert_eq!(config.output_dir(), dir.path().join("public"));
        assert_eq!(config.assets_dir(), None);
    }

    #[test]
    fn test_website_name() {
        let config = Config::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.website_name(), "janedoe.com");

        let mut config = config;
        config.site.url = "https://janedoe.com/portfolio/?ref=x".into();
        assert_eq!(config.website_name(), "janedoe.com");
        config.site.url = "janedoe.com".into();
        assert_eq!(config.website_name(), "janedoe.com");
    }

    #[test]
    fn test_relay_defaults_without_contact_section() {
        assert_eq!(RelayConfig::default().timeout_secs, 10);
        assert_eq!(ContactConfig::default().relay.timeout_secs, 10);

        let yaml = format!("{}contact:\n  admin_email: me@janedoe.com\n", MINIMAL);
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.contact.relay.timeout_secs, 10);
        assert_eq!(config.contact.relay.kind, RelayKind::Log);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("blog"), "/blog/");
        assert_eq!(normalize_base_url("/blog//posts"), "/blog/posts/");
        assert_eq!(normalize_base_url("  /  "), "/");
    }
}
