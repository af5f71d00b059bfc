//! Canonical and sitemap URL derivation for docmap.
//!
//! Both transforms are pure string functions, safe to call from any number
//! of threads:
//! - [`canonical_url`] maps a page's source path to the URL declared in its
//!   `<link rel="canonical">` tag
//! - [`SitemapRewriter`] re-roots renderer-generated URLs under the public
//!   prefix the site is actually reachable at
//!
//! # Example
//!
//! ```
//! use docmap_url::{canonical_url, sitemap_url};
//!
//! assert_eq!(
//!     canonical_url("getting-started/quickstart.md", "https://getbruin.com/docs/ingestr/").unwrap(),
//!     "https://getbruin.com/docs/ingestr/getting-started/quickstart.html"
//! );
//! assert_eq!(
//!     sitemap_url(
//!         "https://localhost/ingestr/supported-sources/stripe/",
//!         "/ingestr/",
//!         "https://getbruin.com/docs/ingestr/",
//!     )
//!     .unwrap(),
//!     "https://getbruin.com/docs/ingestr/supported-sources/stripe/"
//! );
//! ```

mod canonical;
mod path;
mod sitemap;

pub use canonical::canonical_url;
pub use path::{is_external, join_prefix, page_key};
pub use sitemap::{SitemapRewriter, sitemap_url};

/// Error returned when a URL cannot be derived.
#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    /// Relative page path is empty or absolute.
    #[error("Invalid page path {path:?}: {reason}")]
    InvalidPath {
        /// Path as supplied by the renderer.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Generated URL could not be parsed.
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// URL as supplied by the renderer.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}
