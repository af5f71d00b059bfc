//! Sitemap generation.
//!
//! Serializes rewritten URLs in the sitemaps.org format:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://getbruin.com/docs/ingestr/</loc>
//!   </url>
//! </urlset>
//! ```

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Result of rewriting the renderer's sitemap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SitemapReport {
    /// Rewritten URLs, in the renderer's order.
    pub entries: Vec<String>,
    /// Navigation links with no matching sitemap entry, in declared order.
    pub missing: Vec<String>,
}

impl SitemapReport {
    /// True if every navigable page made it into the sitemap.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Serialize the entries as sitemap XML.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML writer fails.
    pub fn to_xml(&self) -> std::io::Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for loc in &self.entries {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            writer.write_event(Event::Start(BytesStart::new("loc")))?;
            writer.write_event(Event::Text(BytesText::new(loc)))?;
            writer.write_event(Event::End(BytesEnd::new("loc")))?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
        xml.push('\n');
        Ok(xml)
    }
}
