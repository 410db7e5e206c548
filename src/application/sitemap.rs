//! sitemap.xml and robots.txt for the studio site.
//!
//! Services and team members own pages; testimonials are only shown inside
//! other pages and are left out.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use url::Url;

use crate::domain::content::ContentItem;

#[derive(Debug, Clone)]
pub struct SitemapService {
    base_url: Url,
}

impl SitemapService {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Generate sitemap.xml content: the home page followed by every item
    /// with a page, in input order.
    pub fn sitemap_xml<'a, I>(&self, items: I) -> String
    where
        I: IntoIterator<Item = &'a ContentItem>,
    {
        let base = normalize_public_site_url(self.base_url.as_str());
        let mut entries = vec![sitemap_entry(&base, "/", None)];

        for item in items {
            let Some(path) = item.path() else {
                continue;
            };
            entries.push(sitemap_entry(&base, &path, item.modified()));
        }

        tracing::debug!(entries = entries.len(), "rendered sitemap");

        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for entry in entries {
            xml.push_str(&entry);
        }
        xml.push_str("</urlset>\n");
        xml
    }

    /// Generate robots.txt content.
    pub fn robots_txt(&self) -> String {
        let base = normalize_public_site_url(self.base_url.as_str());
        let sitemap_url = format!("{base}sitemap.xml");
        format!("User-agent: *\nAllow: /\nSitemap: {sitemap_url}\n")
    }
}

fn normalize_public_site_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    format!("{trimmed}/")
}

fn sitemap_entry(base: &str, path: &str, lastmod: Option<OffsetDateTime>) -> String {
    let loc = xml_escape(&canonical_url(base, path));
    let lastmod_str = lastmod
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_default();
    if lastmod_str.is_empty() {
        format!("  <url><loc>{loc}</loc></url>\n")
    } else {
        format!("  <url><loc>{loc}</loc><lastmod>{lastmod_str}</lastmod></url>\n")
    }
}

fn canonical_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path == "/" {
        base.to_string()
    } else {
        format!("{base}{path}")
    }
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::content::{Person, Rating, Review, ServiceOffering};

    fn sitemap() -> SitemapService {
        SitemapService::new(Url::parse("https://studio.test").expect("url"))
    }

    fn items() -> Vec<ContentItem> {
        vec![
            ContentItem::Service(ServiceOffering {
                id: "s1".into(),
                slug: "hydrafacial".into(),
                name: "Hydrafacial".into(),
                excerpt: None,
                description: None,
                price_text: None,
                duration_minutes: None,
                image: None,
                modified: Some(datetime!(2024-05-01 09:30 UTC)),
                seo: None,
            }),
            ContentItem::Review(Review {
                id: "t1".into(),
                title: "Lovely".into(),
                author_name: "Ana".into(),
                rating: Rating::new(5).expect("rating"),
                body: "Great".into(),
                date_published: None,
                seo: None,
            }),
            ContentItem::Person(Person {
                id: "p1".into(),
                slug: "claire-dubois".into(),
                name: "Claire Dubois".into(),
                job_title: None,
                bio_short: None,
                bio_full: None,
                image: None,
                modified: None,
                seo: None,
            }),
        ]
    }

    #[test]
    fn sitemap_lists_home_and_pages() {
        let xml = sitemap().sitemap_xml(&items());
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  \
<url><loc>https://studio.test</loc></url>\n  \
<url><loc>https://studio.test/services/hydrafacial</loc><lastmod>2024-05-01T09:30:00Z</lastmod></url>\n  \
<url><loc>https://studio.test/team/claire-dubois</loc></url>\n\
</urlset>\n";
        assert_eq!(xml, expected);
    }

    #[test]
    fn robots_points_at_sitemap() {
        assert_eq!(
            sitemap().robots_txt(),
            "User-agent: *\nAllow: /\nSitemap: https://studio.test/sitemap.xml\n"
        );
    }

    #[test]
    fn xml_escape_handles_reserved_characters() {
        assert_eq!(xml_escape("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
