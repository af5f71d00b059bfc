//! YAML navigation document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::links::flatten;
use crate::node::{NavNode, SocialLink};
use crate::validate::validate_scope;

/// Navigation data for a site, loaded from a YAML document.
///
/// ```yaml
/// nav:
///   - label: Guide
///     link: /getting-started/quickstart.md
/// sidebar:
///   - label: Getting started
///     children:
///       - label: Quickstart
///         link: /getting-started/quickstart.md
/// social_links:
///   - icon: github
///     link: https://github.com/bruin-data/ingestr
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavDocument {
    /// Top navigation bar.
    pub nav: Vec<NavNode>,
    /// Sidebar tree.
    pub sidebar: Vec<NavNode>,
    /// Header icon links.
    #[serde(alias = "socialLinks")]
    pub social_links: Vec<SocialLink>,
}

impl NavDocument {
    /// Parse a document from YAML content.
    ///
    /// Empty content yields an empty document. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Parse`] if the YAML is malformed or has unknown keys.
    pub fn from_yaml(content: &str) -> Result<Self, NavError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(trimmed)?)
    }

    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Io`] if the file cannot be read, or
    /// [`NavError::Parse`] if it is not a valid document.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            nav = document.nav.len(),
            sidebar = document.sidebar.len(),
            social_links = document.social_links.len(),
            "Loaded navigation document"
        );
        Ok(document)
    }

    /// Validate the top nav and the sidebar, then the social links.
    ///
    /// `nav` and `sidebar` are separate uniqueness scopes: the top nav may
    /// point at pages that also appear in the sidebar.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), NavError> {
        validate_scope(&self.nav, "nav")?;
        validate_scope(&self.sidebar, "sidebar")?;
        for (index, social) in self.social_links.iter().enumerate() {
            if social.icon.trim().is_empty() || social.link.trim().is_empty() {
                return Err(NavError::EmptySocialLink { index });
            }
        }
        Ok(())
    }

    /// Number of sidebar leaf pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        flatten(&self.sidebar).count()
    }
}
