//! Navigation node types.

use serde::{Deserialize, Serialize};

/// Navigation entry.
///
/// A node is either a leaf (has `link`, no `children`) or a group (has
/// `children`, with `link` used only as the group's landing page). Child
/// order is render order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavNode {
    /// Display text.
    #[serde(alias = "text")]
    pub label: String,
    /// Site-relative link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Child entries, present only on groups.
    #[serde(default, alias = "items", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavNode>>,
    /// Whether the group starts closed.
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl NavNode {
    /// Create a leaf pointing at `link`.
    #[must_use]
    pub fn leaf(label: &str, link: &str) -> Self {
        Self {
            label: label.to_owned(),
            link: Some(link.to_owned()),
            children: None,
            collapsed: false,
        }
    }

    /// Create a group without a landing page.
    #[must_use]
    pub fn group(label: &str, children: Vec<NavNode>) -> Self {
        Self {
            label: label.to_owned(),
            link: None,
            children: Some(children),
            collapsed: false,
        }
    }

    /// Set the landing page link.
    #[must_use]
    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_owned());
        self
    }

    /// Mark the group as initially collapsed.
    #[must_use]
    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }

    /// True if the node has a link and no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none() && self.link.is_some()
    }

    /// True if the node declares children (possibly an empty list).
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.children.is_some()
    }
}

/// Icon link shown in the site header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Icon name understood by the theme (e.g. `github`).
    pub icon: String,
    /// Absolute target URL.
    pub link: String,
}
