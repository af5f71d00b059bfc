//! Sitemap URL rewriting.

use url::Url;

use crate::UrlError;
use crate::path::page_key;

/// Rewrite one generated URL with the trailing-slash policy switched on.
///
/// Shorthand for `SitemapRewriter::new(base_path, public_prefix).rewrite(generated_url)`.
///
/// # Errors
///
/// Returns [`UrlError::InvalidUrl`] if `generated_url` is not an absolute URL.
pub fn sitemap_url(
    generated_url: &str,
    base_path: &str,
    public_prefix: &str,
) -> Result<String, UrlError> {
    SitemapRewriter::new(base_path, public_prefix).rewrite(generated_url)
}

/// Re-roots renderer-generated URLs under the public site prefix.
///
/// The renderer builds sitemap URLs against the path the site is served
/// from (`base_path`, e.g. `/ingestr/`). The public site lives elsewhere
/// (`public_prefix`, e.g. `https://getbruin.com/docs/ingestr/`), so every
/// entry has `base_path` stripped from its path and the remainder appended
/// to `public_prefix`. URLs already under `public_prefix` are left as they
/// are, which makes the rewrite idempotent.
///
/// With the trailing-slash policy on, page URLs get a `/` appended. URLs
/// whose last segment names a file (`faq.html`, `schema.json`) are left
/// without one, since static hosts serve those as files.
#[derive(Clone, Debug)]
pub struct SitemapRewriter {
    base_path: String,
    public_prefix: String,
    trailing_slash: bool,
}

impl SitemapRewriter {
    /// Create a rewriter that appends trailing slashes.
    ///
    /// A missing `/` at the end of `base_path` or `public_prefix` is added,
    /// so the base path only matches whole segments.
    #[must_use]
    pub fn new(base_path: &str, public_prefix: &str) -> Self {
        Self {
            base_path: ensure_trailing_slash(base_path),
            public_prefix: ensure_trailing_slash(public_prefix),
            trailing_slash: true,
        }
    }

    /// Set the trailing-slash policy.
    #[must_use]
    pub fn with_trailing_slash(mut self, enabled: bool) -> Self {
        self.trailing_slash = enabled;
        self
    }

    /// Public prefix, always ending in `/`.
    #[must_use]
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Rewrite a generated URL.
    ///
    /// Query and fragment are preserved; the trailing slash is added to the
    /// path, before them.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::InvalidUrl`] if `generated_url` is not an
    /// absolute URL.
    pub fn rewrite(&self, generated_url: &str) -> Result<String, UrlError> {
        let parsed = Url::parse(generated_url).map_err(|source| UrlError::InvalidUrl {
            url: generated_url.to_owned(),
            source,
        })?;

        let (rest, suffix) = match self.strip_public_prefix(generated_url) {
            Some(rest) => split_suffix(rest),
            None => (strip_base(parsed.path(), &self.base_path), suffix_of(&parsed)),
        };

        let mut url =
            String::with_capacity(self.public_prefix.len() + rest.len() + suffix.len() + 1);
        url.push_str(&self.public_prefix);
        url.push_str(rest);
        if self.trailing_slash && !url.ends_with('/') && !names_file(rest) {
            url.push('/');
        }
        url.push_str(&suffix);
        Ok(url)
    }

    /// Page key of a rewritten URL, relative to the public prefix.
    ///
    /// Returns `None` for URLs outside the public prefix.
    #[must_use]
    pub fn page_key<'u>(&self, public_url: &'u str) -> Option<&'u str> {
        self.strip_public_prefix(public_url).map(page_key)
    }

    fn strip_public_prefix<'u>(&self, url: &'u str) -> Option<&'u str> {
        if let Some(rest) = url.strip_prefix(self.public_prefix.as_str()) {
            return Some(rest);
        }
        (url == self.public_prefix.trim_end_matches('/')).then_some("")
    }
}

fn ensure_trailing_slash(s: &str) -> String {
    let mut s = s.to_owned();
    if !s.ends_with('/') {
        s.push('/');
    }
    s
}

/// True if the last segment of `path` carries a file extension.
fn names_file(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
}

/// Strip `base` from the start of `path`; without it, only the leading `/`.
fn strip_base<'p>(path: &'p str, base: &str) -> &'p str {
    if let Some(rest) = path.strip_prefix(base) {
        return rest;
    }
    if base.len() > 1 && path == base.trim_end_matches('/') {
        return "";
    }
    path.trim_start_matches('/')
}

/// Split `rest` at the first `?` or `#`.
fn split_suffix(rest: &str) -> (&str, String) {
    match rest.find(['?', '#']) {
        Some(at) => (&rest[..at], rest[at..].to_owned()),
        None => (rest, String::new()),
    }
}

fn suffix_of(url: &Url) -> String {
    let mut suffix = String::new();
    if let Some(query) = url.query() {
        suffix.push('?');
        suffix.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        suffix.push('#');
        suffix.push_str(fragment);
    }
    suffix
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BASE: &str = "/ingestr/";
    const PUBLIC: &str = "https://getbruin.com/docs/ingestr/";

    #[test]
    fn test_rewrites_under_public_prefix() {
        assert_eq!(
            sitemap_url("https://host/ingestr/foo/bar/", BASE, PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/foo/bar/"
        );
    }

    #[test]
    fn test_appends_trailing_slash() {
        assert_eq!(
            sitemap_url("https://host/ingestr/supported-sources/stripe", BASE, PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/supported-sources/stripe/"
        );
    }

    #[test]
    fn test_trailing_slash_disabled() {
        let rewriter = SitemapRewriter::new(BASE, PUBLIC).with_trailing_slash(false);
        assert_eq!(
            rewriter.rewrite("https://host/ingestr/getting-started/quickstart").unwrap(),
            "https://getbruin.com/docs/ingestr/getting-started/quickstart"
        );
    }

    #[test]
    fn test_file_urls_get_no_trailing_slash() {
        assert_eq!(
            sitemap_url("https://host/ingestr/getting-started/quickstart.html", BASE, PUBLIC)
                .unwrap(),
            "https://getbruin.com/docs/ingestr/getting-started/quickstart.html"
        );
        assert_eq!(
            sitemap_url("https://host/ingestr/assets/schema.json?v=2", BASE, PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/assets/schema.json?v=2"
        );
        assert_eq!(
            sitemap_url("https://host/ingestr/v1.2/", BASE, PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/v1.2/"
        );
        assert_eq!(
            sitemap_url("https://host/ingestr/.well-known", BASE, PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/.well-known/"
        );
    }

    #[test]
    fn test_base_path_matches_whole_segments() {
        assert_eq!(
            sitemap_url("https://host/ingestrfoo/bar/", "/ingestr", PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/ingestrfoo/bar/"
        );
        assert_eq!(
            sitemap_url("https://host/ingestr/foo/bar/", "/ingestr", PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/foo/bar/"
        );
        assert_eq!(sitemap_url("https://host/ingestr", "/ingestr", PUBLIC).unwrap(), PUBLIC);
    }

    #[test]
    fn test_site_root() {
        assert_eq!(
            sitemap_url("https://host/ingestr/", BASE, PUBLIC).unwrap(),
            PUBLIC
        );
        assert_eq!(
            sitemap_url("https://host/ingestr", BASE, PUBLIC).unwrap(),
            PUBLIC
        );
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let inputs = [
            "https://host/ingestr/foo/bar/",
            "https://host/ingestr/",
            "https://host/ingestr/faq",
            "https://host/ingestr/faq.html",
            "https://host/ingestr/search?q=stripe#results",
        ];
        for input in inputs {
            let once = sitemap_url(input, BASE, PUBLIC).unwrap();
            let twice = sitemap_url(&once, BASE, PUBLIC).unwrap();
            assert_eq!(once, twice, "{input}");
        }
    }

    #[test]
    fn test_missing_base_path_is_not_an_error() {
        assert_eq!(
            sitemap_url("https://host/other/page/", BASE, PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/other/page/"
        );
    }

    #[test]
    fn test_root_base_path() {
        assert_eq!(
            sitemap_url("https://localhost:5173/guide/", "/", PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/guide/"
        );
    }

    #[test]
    fn test_preserves_query_and_fragment() {
        assert_eq!(
            sitemap_url("https://host/ingestr/search?q=stripe#results", BASE, PUBLIC).unwrap(),
            "https://getbruin.com/docs/ingestr/search/?q=stripe#results"
        );
    }

    #[test]
    fn test_public_prefix_gets_trailing_slash() {
        let rewriter = SitemapRewriter::new(BASE, "https://getbruin.com/docs/ingestr");
        assert_eq!(rewriter.public_prefix(), PUBLIC);
        assert_eq!(
            rewriter.rewrite("https://host/ingestr/faq/").unwrap(),
            "https://getbruin.com/docs/ingestr/faq/"
        );
    }

    #[test]
    fn test_invalid_url() {
        let err = sitemap_url("/ingestr/relative/", BASE, PUBLIC).unwrap_err();
        assert!(matches!(err, UrlError::InvalidUrl { .. }));
        assert!(err.to_string().contains("/ingestr/relative/"));
    }

    #[test]
    fn test_page_key_of_rewritten_url() {
        let rewriter = SitemapRewriter::new(BASE, PUBLIC);
        assert_eq!(
            rewriter.page_key("https://getbruin.com/docs/ingestr/supported-sources/stripe.html/"),
            Some("supported-sources/stripe")
        );
        assert_eq!(rewriter.page_key(PUBLIC), Some(""));
        assert_eq!(rewriter.page_key("https://elsewhere.com/x/"), None);
    }
}
