//! Build-time configuration for docmap.
//!
//! Parses `docmap.toml` with serde and provides auto-discovery of the config
//! file in parent directories. Build-specific overrides can be applied during
//! load via [`Overrides`].
//!
//! ## Recognized options
//!
//! ```toml
//! title = "ingestr"
//! description = "Copy data from any source to any destination"
//! base = "/ingestr/"
//!
//! [[head]]
//! tag = "script"
//! attrs = { async = "", src = "https://www.googletagmanager.com/gtag/js?id=G-XXXX" }
//!
//! [sitemap]
//! hostname = "https://getbruin.com/docs/ingestr/"
//! trailing_slash = true
//!
//! [canonical]
//! host = "https://getbruin.com"
//! mount = "/docs/ingestr/"
//!
//! [theme]
//! navigation = "nav.yaml"
//! outline = "deep"
//! search = { provider = "local" }
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `sitemap.hostname`
//! - `canonical.host`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Overrides applied on top of the loaded configuration.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override the serving base path.
    pub base: Option<String>,
    /// Override the sitemap public prefix.
    pub sitemap_hostname: Option<String>,
    /// Override the canonical URL host.
    pub canonical_host: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docmap.toml";

/// Default navigation document, relative to the config file.
const DEFAULT_NAVIGATION_FILE: &str = "nav.yaml";

/// Deepest heading level an outline may include.
const MAX_HEADING_LEVEL: u8 = 6;

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Path prefix under which the site is served (e.g. `/ingestr/`).
    pub base: String,
    /// Raw tags injected into every page head.
    pub head: Vec<HeadTag>,
    /// Sitemap rewriting (optional section).
    pub sitemap: Option<SitemapConfig>,
    /// Canonical link derivation (optional section).
    pub canonical: Option<CanonicalConfig>,
    /// Theme configuration (paths are relative strings from TOML).
    theme: ThemeConfigRaw,

    /// Resolved theme configuration (set after loading).
    #[serde(skip)]
    pub theme_resolved: ThemeConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw tag injected into the page head, passed through verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadTag {
    /// Element name (e.g. `script`, `meta`, `link`).
    pub tag: String,
    /// Element attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content, emitted without escaping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl HeadTag {
    /// Create a tag without content.
    #[must_use]
    pub fn new(tag: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_owned(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            content: None,
        }
    }
}

/// Sitemap configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Public prefix generated URLs are re-rooted under.
    pub hostname: String,
    /// Append a trailing slash to every sitemap page URL.
    #[serde(default = "default_trailing_slash", alias = "trailingSlash")]
    pub trailing_slash: bool,
}

fn default_trailing_slash() -> bool {
    true
}

/// Canonical URL configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanonicalConfig {
    /// Public scheme and host (e.g. `https://getbruin.com`).
    pub host: String,
    /// Public mount prefix joined to the host (e.g. `/docs/ingestr/`).
    #[serde(default = "default_mount")]
    pub mount: String,
}

fn default_mount() -> String {
    "/".to_owned()
}

/// Raw theme configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeConfigRaw {
    navigation: Option<String>,
    outline: Outline,
    search: SearchConfig,
}

/// Resolved theme configuration.
#[derive(Debug, Default)]
pub struct ThemeConfig {
    /// Absolute path to the YAML navigation document.
    pub navigation: PathBuf,
    /// Heading levels shown in the page outline.
    pub outline: Outline,
    /// Search configuration.
    pub search: SearchConfig,
}

/// Inclusive range of heading levels shown in the page outline.
///
/// Accepts a single level (`3`), a range (`[2, 3]`) or `"deep"` (`[2, 6]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "OutlineRaw")]
pub struct Outline {
    /// Shallowest level.
    pub min: u8,
    /// Deepest level.
    pub max: u8,
}

impl Default for Outline {
    fn default() -> Self {
        Self { min: 2, max: 2 }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OutlineRaw {
    Level(u8),
    Range([u8; 2]),
    Keyword(OutlineKeyword),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum OutlineKeyword {
    Deep,
}

impl From<OutlineRaw> for Outline {
    fn from(raw: OutlineRaw) -> Self {
        match raw {
            OutlineRaw::Level(level) => Self {
                min: level,
                max: level,
            },
            OutlineRaw::Range([min, max]) => Self { min, max },
            OutlineRaw::Keyword(OutlineKeyword::Deep) => Self {
                min: 2,
                max: MAX_HEADING_LEVEL,
            },
        }
    }
}

/// Search configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Search provider; `None` disables search.
    pub provider: Option<SearchProvider>,
}

/// Recognized search providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Client-side index built by the rendering engine.
    Local,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`sitemap.hostname`").
        field: String,
        /// Error message (e.g., "${`PUBLIC_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn require_slashes(path: &str, field: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') || !path.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start and end with '/', got {path:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docmap.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(base) = &overrides.base {
            self.base.clone_from(base);
        }
        if let Some(hostname) = &overrides.sitemap_hostname {
            match &mut self.sitemap {
                Some(sitemap) => sitemap.hostname.clone_from(hostname),
                None => {
                    self.sitemap = Some(SitemapConfig {
                        hostname: hostname.clone(),
                        trailing_slash: default_trailing_slash(),
                    });
                }
            }
        }
        if let Some(host) = &overrides.canonical_host {
            match &mut self.canonical {
                Some(canonical) => canonical.host.clone_from(host),
                None => {
                    self.canonical = Some(CanonicalConfig {
                        host: host.clone(),
                        mount: default_mount(),
                    });
                }
            }
        }
    }

    /// Get the sitemap configuration.
    ///
    /// Use this instead of reading the `sitemap` field directly when the
    /// caller cannot proceed without it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the `[sitemap]` section is missing.
    pub fn require_sitemap(&self) -> Result<&SitemapConfig, ConfigError> {
        self.sitemap.as_ref().ok_or_else(|| {
            ConfigError::Validation("[sitemap] section with hostname required in config".into())
        })
    }

    /// Whether client-side search indexing is enabled.
    #[must_use]
    pub fn search_enabled(&self) -> bool {
        self.theme_resolved.search.provider.is_some()
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            title: "Documentation".to_owned(),
            description: String::new(),
            base: "/".to_owned(),
            head: Vec::new(),
            sitemap: None,
            canonical: None,
            theme: ThemeConfigRaw::default(),
            theme_resolved: ThemeConfig {
                navigation: base.join(DEFAULT_NAVIGATION_FILE),
                outline: Outline::default(),
                search: SearchConfig::default(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        require_slashes(&self.base, "base")?;
        self.validate_head()?;
        self.validate_urls()?;
        self.validate_outline()?;
        Ok(())
    }

    fn validate_head(&self) -> Result<(), ConfigError> {
        for (i, tag) in self.head.iter().enumerate() {
            require_non_empty(&tag.tag, &format!("head[{i}].tag"))?;
        }
        Ok(())
    }

    fn validate_urls(&self) -> Result<(), ConfigError> {
        if let Some(sitemap) = &self.sitemap {
            require_non_empty(&sitemap.hostname, "sitemap.hostname")?;
            require_http_url(&sitemap.hostname, "sitemap.hostname")?;
        }
        if let Some(canonical) = &self.canonical {
            require_non_empty(&canonical.host, "canonical.host")?;
            require_http_url(&canonical.host, "canonical.host")?;
            require_slashes(&canonical.mount, "canonical.mount")?;
        }
        Ok(())
    }

    fn validate_outline(&self) -> Result<(), ConfigError> {
        let Outline { min, max } = self.theme_resolved.outline;
        if min == 0 || max > MAX_HEADING_LEVEL {
            return Err(ConfigError::Validation(format!(
                "theme.outline levels must be between 1 and {MAX_HEADING_LEVEL}"
            )));
        }
        if min > max {
            return Err(ConfigError::Validation(format!(
                "theme.outline range is reversed: [{min}, {max}]"
            )));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut sitemap) = self.sitemap {
            sitemap.hostname = expand::expand_env(&sitemap.hostname, "sitemap.hostname")?;
        }
        if let Some(ref mut canonical) = self.canonical {
            canonical.host = expand::expand_env(&canonical.host, "canonical.host")?;
        }
        Ok(())
    }

    /// Resolve the navigation document path against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let navigation = self
            .theme
            .navigation
            .as_deref()
            .unwrap_or(DEFAULT_NAVIGATION_FILE);

        self.theme_resolved = ThemeConfig {
            navigation: config_dir.join(navigation),
            outline: self.theme.outline,
            search: self.theme.search.clone(),
        };
    }
}
