//! Head tag rendering.

use std::fmt::Write;

use docmap_config::HeadTag;

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &["base", "link", "meta"];

/// Build the `<link rel="canonical">` tag for `url`.
#[must_use]
pub fn canonical_link(url: &str) -> HeadTag {
    HeadTag::new("link", &[("rel", "canonical"), ("href", url)])
}

/// Render a head tag as HTML.
///
/// Attribute values are escaped. Content is emitted verbatim: head tags
/// carry third-party scripts that must reach the page unchanged.
#[must_use]
pub fn render_head_tag(tag: &HeadTag) -> String {
    let mut html = String::with_capacity(64);
    html.push('<');
    html.push_str(&tag.tag);
    for (name, value) in &tag.attrs {
        let _ = write!(html, " {name}=\"{}\"", escape_html(value));
    }
    html.push('>');

    if VOID_ELEMENTS.contains(&tag.tag.as_str()) && tag.content.is_none() {
        return html;
    }

    if let Some(content) = &tag.content {
        html.push_str(content);
    }
    let _ = write!(html, "</{}>", tag.tag);
    html
}

/// Escape special HTML characters in attribute values.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
