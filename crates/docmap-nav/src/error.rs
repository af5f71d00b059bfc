//! Navigation errors.

use std::fmt;
use std::path::PathBuf;

/// Position of a node inside a navigation tree.
///
/// Displays as `sidebar[1][0] (Supported sources > Stripe)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeLocation {
    /// Name of the tree (`nav`, `sidebar`, ...).
    pub scope: String,
    /// Child index at each depth, outermost first.
    pub indices: Vec<usize>,
    /// Labels from the root down to the node.
    pub trail: Vec<String>,
}

impl fmt::Display for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scope)?;
        for index in &self.indices {
            write!(f, "[{index}]")?;
        }
        write!(f, " ({})", self.trail.join(" > "))
    }
}

/// Error returned when a navigation document is unusable.
///
/// All variants are authoring defects and must abort the build.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Node has neither a link nor children.
    #[error("Malformed navigation node at {location}: expected a link or children")]
    MalformedNode {
        /// Offending node.
        location: NodeLocation,
    },
    /// Group declares an empty children list.
    #[error("Empty navigation group at {location}")]
    EmptyGroup {
        /// Offending node.
        location: NodeLocation,
    },
    /// Two nodes share the same link.
    #[error("Duplicate navigation link {link:?} at {location}, first declared at {first}")]
    DuplicateLink {
        /// Repeated link value.
        link: String,
        /// Node that declared the link first.
        first: NodeLocation,
        /// Node that repeats it.
        location: NodeLocation,
    },
    /// Node label is empty.
    #[error("Navigation node at {location} has an empty label")]
    EmptyLabel {
        /// Offending node.
        location: NodeLocation,
    },
    /// Social link is missing its icon or target.
    #[error("Social link #{index} requires both icon and link")]
    EmptySocialLink {
        /// Position in `social_links`.
        index: usize,
    },
    /// Navigation document could not be read.
    #[error("Failed to read navigation document {}: {source}", .path.display())]
    Io {
        /// Document path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Navigation document is not valid YAML for the model.
    #[error("Invalid navigation document: {0}")]
    Parse(#[from] serde_yaml::Error),
}
