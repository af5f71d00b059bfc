//! Navigation tree model for docmap.
//!
//! This crate provides:
//! - [`NavNode`]: one entry of the top nav or sidebar tree
//! - [`validate`]: fail-fast structural validation of a tree
//! - [`flatten`]: lazy pre-order iteration over leaf links
//! - [`NavDocument`]: the YAML document holding nav, sidebar and social links
//!
//! # Quick Start
//!
//! ```
//! use docmap_nav::{NavNode, flatten, validate};
//!
//! let sidebar = vec![NavNode::group(
//!     "Getting started",
//!     vec![
//!         NavNode::leaf("Quickstart", "/getting-started/quickstart.md"),
//!         NavNode::leaf("Core concepts", "/getting-started/core-concepts.md"),
//!     ],
//! )];
//!
//! validate(&sidebar).unwrap();
//! let links: Vec<_> = flatten(&sidebar).collect();
//! assert_eq!(
//!     links,
//!     ["/getting-started/quickstart.md", "/getting-started/core-concepts.md"]
//! );
//! ```

mod document;
mod error;
mod links;
mod node;
mod validate;

pub use document::NavDocument;
pub use error::{NavError, NodeLocation};
pub use links::{Links, all_links, flatten};
pub use node::{NavNode, SocialLink};
pub use validate::{validate, validate_scope};
