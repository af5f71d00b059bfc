//! Link and prefix helpers.

/// Join a public host and a mount prefix into a URL prefix ending in `/`.
///
/// ```
/// assert_eq!(
///     docmap_url::join_prefix("https://getbruin.com/", "docs/ingestr"),
///     "https://getbruin.com/docs/ingestr/"
/// );
/// ```
#[must_use]
pub fn join_prefix(host: &str, mount: &str) -> String {
    let mount = mount.trim_matches('/');
    let mut prefix = host.trim_end_matches('/').to_owned();
    prefix.push('/');
    if !mount.is_empty() {
        prefix.push_str(mount);
        prefix.push('/');
    }
    prefix
}

/// True for links that leave the site (absolute URLs, `mailto:` and friends).
#[must_use]
pub fn is_external(link: &str) -> bool {
    link.starts_with("//")
        || link
            .split_once(':')
            .is_some_and(|(scheme, _)| is_scheme(scheme))
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Normalize a site-relative link or path into a comparable page key.
///
/// Drops query and fragment, surrounding slashes, a `.md` or `.html`
/// extension and a trailing `index` segment, so that
/// `/supported-sources/index.md`, `supported-sources/` and
/// `supported-sources/index.html` all map to `supported-sources`.
#[must_use]
pub fn page_key(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_matches('/');
    let path = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".html"))
        .unwrap_or(path);
    if path == "index" {
        return "";
    }
    path.strip_suffix("/index").unwrap_or(path)
}
