//! Rendering-engine integration for docmap.
//!
//! This crate provides:
//! - [`Site`]: validated configuration and navigation, loaded once per build
//! - Per-page head tags with the canonical link
//! - Sitemap rewriting, cross-checked against the navigation
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docmap_config::Config;
//! use docmap_site::Site;
//!
//! let config = Config::load(None, None)?;
//! let site = Site::load(config)?;
//!
//! // Per page
//! let head = site.render_head("getting-started/quickstart.md")?;
//!
//! // Once per build
//! let xml = site.sitemap_xml(["https://localhost/ingestr/getting-started/quickstart/"])?;
//! # Ok(())
//! # }
//! ```

mod head;
mod site;
mod sitemap;

pub use head::{canonical_link, render_head_tag};
pub use site::{Site, SiteError};
pub use sitemap::SitemapReport;

// Re-export the data types the renderer consumes
pub use docmap_config::{Config, HeadTag};
pub use docmap_nav::{NavNode, SocialLink};
