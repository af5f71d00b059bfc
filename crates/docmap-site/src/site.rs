//! Site configuration surface exposed to the rendering engine.
//!
//! [`Site`] joins the scalar configuration from `docmap.toml` with the
//! navigation document it points at, validates both once, and answers the
//! renderer's per-page questions: which head tags to inject, what the
//! canonical URL is, and what the sitemap should contain.
//!
//! # Thread Safety
//!
//! `Site` is immutable after construction. All methods take `&self` and
//! share no mutable state, so one instance can serve every render worker.

use std::collections::HashSet;

use docmap_config::{Config, ConfigError, HeadTag, Outline, SearchConfig};
use docmap_nav::{Links, NavDocument, NavError, NavNode, SocialLink, all_links, flatten};
use docmap_url::{SitemapRewriter, UrlError, canonical_url, is_external, join_prefix, page_key};
use serde::Serialize;

use crate::head::{canonical_link, render_head_tag};
use crate::sitemap::SitemapReport;

/// Error returned while loading a site or deriving page data.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Invalid navigation document.
    #[error(transparent)]
    Navigation(#[from] NavError),
    /// URL could not be derived.
    #[error(transparent)]
    Url(#[from] UrlError),
    /// Sitemap serialization failed.
    #[error("Failed to write sitemap: {0}")]
    Sitemap(#[source] std::io::Error),
    /// Theme data serialization failed.
    #[error("Failed to serialize theme data: {0}")]
    Theme(#[source] serde_json::Error),
}

/// Theme data handed to the renderer as JSON.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeData<'a> {
    title: &'a str,
    description: &'a str,
    base: &'a str,
    nav: &'a [NavNode],
    sidebar: &'a [NavNode],
    social_links: &'a [SocialLink],
    outline: Outline,
    search: &'a SearchConfig,
}

/// Validated site configuration and navigation.
pub struct Site {
    config: Config,
    navigation: NavDocument,
    canonical_prefix: Option<String>,
}

impl Site {
    /// Load the navigation document referenced by `config` and build a site.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or fails validation.
    pub fn load(config: Config) -> Result<Self, SiteError> {
        let navigation = NavDocument::load(&config.theme_resolved.navigation)?;
        Self::new(config, navigation)
    }

    /// Build a site from already loaded parts.
    ///
    /// # Errors
    ///
    /// Returns the first navigation violation; the build must not proceed.
    pub fn new(config: Config, navigation: NavDocument) -> Result<Self, SiteError> {
        if let Err(err) = navigation.validate() {
            tracing::error!(error = %err, "Navigation validation failed");
            return Err(err.into());
        }

        let canonical_prefix = config
            .canonical
            .as_ref()
            .map(|canonical| join_prefix(&canonical.host, &canonical.mount));

        tracing::info!(
            title = %config.title,
            base = %config.base,
            pages = navigation.page_count(),
            canonical = canonical_prefix.is_some(),
            sitemap = config.sitemap.is_some(),
            "Site configuration loaded"
        );

        Ok(Self {
            config,
            navigation,
            canonical_prefix,
        })
    }

    /// Underlying configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Top navigation bar.
    #[must_use]
    pub fn nav(&self) -> &[NavNode] {
        &self.navigation.nav
    }

    /// Sidebar tree.
    #[must_use]
    pub fn sidebar(&self) -> &[NavNode] {
        &self.navigation.sidebar
    }

    /// Header icon links.
    #[must_use]
    pub fn social_links(&self) -> &[SocialLink] {
        &self.navigation.social_links
    }

    /// Sidebar leaf links in render order.
    #[must_use]
    pub fn pages(&self) -> Links<'_> {
        flatten(&self.navigation.sidebar)
    }

    /// Theme data (navigation, outline, search) as JSON for the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Theme`] if the data cannot be serialized.
    pub fn theme_json(&self) -> Result<serde_json::Value, SiteError> {
        let data = ThemeData {
            title: &self.config.title,
            description: &self.config.description,
            base: &self.config.base,
            nav: &self.navigation.nav,
            sidebar: &self.navigation.sidebar,
            social_links: &self.navigation.social_links,
            outline: self.config.theme_resolved.outline,
            search: &self.config.theme_resolved.search,
        };
        serde_json::to_value(data).map_err(SiteError::Theme)
    }

    /// Canonical URL for the page at `relative_path`.
    ///
    /// Returns `None` when no `[canonical]` section is configured.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::InvalidPath`] for an empty or absolute path.
    pub fn canonical_url(&self, relative_path: &str) -> Result<Option<String>, SiteError> {
        let Some(prefix) = &self.canonical_prefix else {
            return Ok(None);
        };
        Ok(Some(canonical_url(relative_path, prefix)?))
    }

    /// Head tags for the page at `relative_path`: configured tags in
    /// declared order, then the canonical link.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::InvalidPath`] for an empty or absolute path.
    pub fn head_tags(&self, relative_path: &str) -> Result<Vec<HeadTag>, SiteError> {
        let mut tags = self.config.head.clone();
        if let Some(url) = self.canonical_url(relative_path)? {
            tags.push(canonical_link(&url));
        }
        Ok(tags)
    }

    /// Head tags for the page rendered as HTML, one tag per line.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::InvalidPath`] for an empty or absolute path.
    pub fn render_head(&self, relative_path: &str) -> Result<String, SiteError> {
        let tags = self.head_tags(relative_path)?;
        Ok(tags
            .iter()
            .map(render_head_tag)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Rewrite the renderer's sitemap URLs and cross-check them against the
    /// navigation.
    ///
    /// Every internal link of the sidebar and the top nav, group landing
    /// pages included, is expected to have a sitemap entry. Missing pages
    /// are logged and listed in the report.
    ///
    /// # Errors
    ///
    /// Returns an error if `[sitemap]` is not configured or a URL is invalid.
    pub fn sitemap<'u, I>(&self, generated_urls: I) -> Result<SitemapReport, SiteError>
    where
        I: IntoIterator<Item = &'u str>,
    {
        let sitemap = self.config.require_sitemap()?;
        let rewriter = SitemapRewriter::new(&self.config.base, &sitemap.hostname)
            .with_trailing_slash(sitemap.trailing_slash);

        let entries = generated_urls
            .into_iter()
            .map(|url| rewriter.rewrite(url))
            .collect::<Result<Vec<_>, _>>()?;

        let present: HashSet<&str> = entries
            .iter()
            .filter_map(|url| rewriter.page_key(url))
            .collect();

        let mut reported = HashSet::new();
        let missing: Vec<String> = all_links(&self.navigation.sidebar)
            .chain(all_links(&self.navigation.nav))
            .filter(|link| !is_external(link))
            .filter(|link| !present.contains(page_key(*link)))
            .filter(|link| reported.insert(page_key(*link)))
            .map(str::to_owned)
            .collect();

        for link in &missing {
            tracing::warn!(link = %link, "Navigation page missing from sitemap");
        }
        tracing::debug!(
            entries = entries.len(),
            missing = missing.len(),
            "Sitemap rewritten"
        );

        Ok(SitemapReport { entries, missing })
    }

    /// Rewrite the sitemap and serialize it as XML.
    ///
    /// # Errors
    ///
    /// See [`Site::sitemap`].
    pub fn sitemap_xml<'u, I>(&self, generated_urls: I) -> Result<String, SiteError>
    where
        I: IntoIterator<Item = &'u str>,
    {
        self.sitemap(generated_urls)?
            .to_xml()
            .map_err(SiteError::Sitemap)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(super::Site: Send, Sync);

    const CONFIG: &str = r#"
title = "ingestr"
description = "Copy data between any source and any destination"
base = "/ingestr/"

[[head]]
tag = "script"
attrs = { async = "", src = "https://www.googletagmanager.com/gtag/js?id=G-TEST" }

[sitemap]
hostname = "https://getbruin.com/docs/ingestr/"

[canonical]
host = "https://getbruin.com"
mount = "/docs/ingestr/"

[theme]
outline = [2, 3]
search = { provider = "local" }
"#;

    const NAVIGATION: &str = r"
nav:
  - label: Guide
    link: /getting-started/quickstart.md
sidebar:
  - label: Introduction
    link: /
  - label: Getting started
    children:
      - label: Quickstart
        link: /getting-started/quickstart.md
      - label: Core concepts
        link: /getting-started/core-concepts.md
  - label: Sources
    link: /supported-sources/
    children:
      - label: Stripe
        link: /supported-sources/stripe.md
      - label: Changelog
        link: https://github.com/bruin-data/ingestr/releases
social_links:
  - icon: github
    link: https://github.com/bruin-data/ingestr
";

    fn config() -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docmap.toml");
        std::fs::write(&path, CONFIG).unwrap();
        Config::load(Some(&path), None).unwrap()
    }

    fn site() -> Site {
        Site::new(config(), NavDocument::from_yaml(NAVIGATION).unwrap()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_navigation() {
        let mut navigation = NavDocument::from_yaml(NAVIGATION).unwrap();
        navigation
            .sidebar
            .push(NavNode::leaf("Quickstart again", "/getting-started/quickstart.md"));

        let result = Site::new(config(), navigation);

        assert!(matches!(
            result,
            Err(SiteError::Navigation(NavError::DuplicateLink { .. }))
        ));
    }

    #[test]
    fn test_navigation_accessors() {
        let site = site();

        assert_eq!(site.nav().len(), 1);
        assert_eq!(site.sidebar().len(), 3);
        assert_eq!(site.social_links()[0].icon, "github");
        assert_eq!(
            site.pages().collect::<Vec<_>>(),
            vec![
                "/",
                "/getting-started/quickstart.md",
                "/getting-started/core-concepts.md",
                "/supported-sources/stripe.md",
                "https://github.com/bruin-data/ingestr/releases",
            ]
        );
    }

    #[test]
    fn test_theme_json() {
        let json = site().theme_json().unwrap();

        assert!(json.is_object());
        assert_eq!(json["title"], "ingestr");
        assert_eq!(json["base"], "/ingestr/");
        assert_eq!(json["sidebar"][1]["children"][0]["label"], "Quickstart");
        assert_eq!(json["socialLinks"][0]["icon"], "github");
        assert_eq!(json["outline"]["max"], 3);
        assert_eq!(json["search"]["provider"], "local");
    }

    #[test]
    fn test_canonical_url() {
        let site = site();

        assert_eq!(
            site.canonical_url("getting-started/quickstart.md").unwrap(),
            Some("https://getbruin.com/docs/ingestr/getting-started/quickstart.html".to_owned())
        );
        assert_eq!(
            site.canonical_url("index.md").unwrap(),
            Some("https://getbruin.com/docs/ingestr/".to_owned())
        );
    }

    #[test]
    fn test_canonical_url_disabled() {
        let mut config = config();
        config.canonical = None;
        let site = Site::new(config, NavDocument::default()).unwrap();

        assert_eq!(site.canonical_url("index.md").unwrap(), None);
        assert!(site.head_tags("index.md").unwrap().is_empty());
    }

    #[test]
    fn test_canonical_url_rejects_absolute_path() {
        let err = site().canonical_url("/index.md").unwrap_err();
        assert!(matches!(err, SiteError::Url(UrlError::InvalidPath { .. })));
    }

    #[test]
    fn test_head_tags_end_with_canonical_link() {
        let tags = site().head_tags("supported-sources/index.md").unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].tag, "script");
        assert_eq!(
            tags[1],
            HeadTag::new(
                "link",
                &[
                    ("rel", "canonical"),
                    ("href", "https://getbruin.com/docs/ingestr/supported-sources/"),
                ]
            )
        );
    }

    #[test]
    fn test_render_head() {
        let html = site().render_head("getting-started/quickstart.md").unwrap();
        let lines: Vec<_> = html.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("<script async=\"\""));
        assert_eq!(
            lines[1],
            r#"<link href="https://getbruin.com/docs/ingestr/getting-started/quickstart.html" rel="canonical">"#
        );
    }

    #[test]
    fn test_sitemap_complete() {
        let report = site()
            .sitemap([
                "https://localhost/ingestr/",
                "https://localhost/ingestr/getting-started/quickstart.html",
                "https://localhost/ingestr/getting-started/core-concepts.html",
                "https://localhost/ingestr/supported-sources/",
                "https://localhost/ingestr/supported-sources/stripe.html",
            ])
            .unwrap();

        assert_eq!(
            report.entries,
            vec![
                "https://getbruin.com/docs/ingestr/",
                "https://getbruin.com/docs/ingestr/getting-started/quickstart.html",
                "https://getbruin.com/docs/ingestr/getting-started/core-concepts.html",
                "https://getbruin.com/docs/ingestr/supported-sources/",
                "https://getbruin.com/docs/ingestr/supported-sources/stripe.html",
            ]
        );
        assert!(report.is_complete(), "missing: {:?}", report.missing);
    }

    #[test]
    fn test_sitemap_reports_missing_pages_once() {
        let report = site()
            .sitemap(["https://localhost/ingestr/", "https://localhost/ingestr/supported-sources/"])
            .unwrap();

        // Quickstart appears in both sidebar and nav but is reported once.
        assert_eq!(
            report.missing,
            vec![
                "/getting-started/quickstart.md",
                "/getting-started/core-concepts.md",
                "/supported-sources/stripe.md",
            ]
        );
    }

    #[test]
    fn test_sitemap_requires_configuration() {
        let mut config = config();
        config.sitemap = None;
        let site = Site::new(config, NavDocument::default()).unwrap();

        let err = site.sitemap(["https://localhost/ingestr/"]).unwrap_err();

        assert!(matches!(err, SiteError::Config(ConfigError::Validation(_))));
        assert!(err.to_string().contains("[sitemap]"));
    }

    #[test]
    fn test_sitemap_invalid_url() {
        let err = site().sitemap(["not a url"]).unwrap_err();
        assert!(matches!(err, SiteError::Url(UrlError::InvalidUrl { .. })));
    }

    #[test]
    fn test_sitemap_xml() {
        let xml = site()
            .sitemap_xml(["https://localhost/ingestr/supported-sources/stripe"])
            .unwrap();

        assert!(xml.contains(
            "<loc>https://getbruin.com/docs/ingestr/supported-sources/stripe/</loc>"
        ));
    }

    #[test]
    fn test_load_reads_navigation_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("docmap.toml"), CONFIG).unwrap();
        std::fs::write(dir.path().join("nav.yaml"), NAVIGATION).unwrap();

        let config = Config::load(Some(&dir.path().join("docmap.toml")), None).unwrap();
        let site = Site::load(config).unwrap();

        assert_eq!(site.sidebar().len(), 3);
        assert_eq!(site.config().title, "ingestr");
    }

    #[test]
    fn test_load_missing_navigation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("docmap.toml"), CONFIG).unwrap();

        let config = Config::load(Some(&dir.path().join("docmap.toml")), None).unwrap();
        let err = Site::load(config).err().unwrap();

        assert!(matches!(err, SiteError::Navigation(NavError::Io { .. })));
    }
}
