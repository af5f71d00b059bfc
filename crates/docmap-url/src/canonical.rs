//! Canonical URL derivation.

use crate::UrlError;

/// Derive the canonical URL of a page from its source path.
///
/// `relative_path` is the page's markdown path relative to the docs root
/// (`getting-started/quickstart.md`). `canonical_host` is the public host
/// already joined with the mount prefix and ending in `/` (see
/// [`join_prefix`](crate::join_prefix)).
///
/// The two are concatenated, then:
/// 1. an `index.md` file name is dropped, leaving the directory URL;
/// 2. otherwise a `.md` extension becomes `.html`.
///
/// # Errors
///
/// Returns [`UrlError::InvalidPath`] if `relative_path` is empty or starts
/// with `/`.
pub fn canonical_url(relative_path: &str, canonical_host: &str) -> Result<String, UrlError> {
    check_relative(relative_path)?;

    let mut url = String::with_capacity(canonical_host.len() + relative_path.len() + 2);
    url.push_str(canonical_host);

    if let Some(dir) = strip_index(relative_path) {
        url.push_str(dir);
    } else if let Some(stem) = relative_path.strip_suffix(".md") {
        url.push_str(stem);
        url.push_str(".html");
    } else {
        url.push_str(relative_path);
    }

    Ok(url)
}

fn check_relative(path: &str) -> Result<(), UrlError> {
    let reason = if path.is_empty() {
        "path is empty"
    } else if path.starts_with('/') {
        "path must not start with '/'"
    } else {
        return Ok(());
    };
    Err(UrlError::InvalidPath {
        path: path.to_owned(),
        reason,
    })
}

/// Directory part of an `index.md` path, trailing slash kept.
///
/// Only a whole `index.md` segment counts, so `reindex.md` is a regular page.
fn strip_index(path: &str) -> Option<&str> {
    if path == "index.md" {
        return Some("");
    }
    path.strip_suffix("index.md").filter(|dir| dir.ends_with('/'))
}
