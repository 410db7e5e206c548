//! Per-item SEO overrides and the normalised metadata derived from them.

use serde::Serialize;

use super::content::BreadcrumbEntry;

/// Upstream marker for a set robots flag.
const ROBOTS_FLAG_SET: &str = "1";

/// Convert an upstream robots flag into a boolean.
///
/// Only the exact string `"1"` means set; `"0"`, any other value, and absence
/// all mean unset.
pub fn robots_flag(value: Option<&str>) -> bool {
    value == Some(ROBOTS_FLAG_SET)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialImage {
    pub url: String,
    pub alt_text: Option<String>,
}

/// Title/description/image shown when a page is shared on one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialCard {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<SocialImage>,
}

/// Editor-supplied SEO fields attached to a content item.
///
/// Every text field is optional and `None` is distinct from `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSeoOverride {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub open_graph: SocialCard,
    pub twitter: SocialCard,
    pub robots_noindex: bool,
    pub robots_nofollow: bool,
    pub focus_keyword: Option<String>,
    pub breadcrumbs: Option<Vec<BreadcrumbEntry>>,
}

/// Resolved `<head>` metadata for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub image_alt: String,
    pub noindex: bool,
    pub nofollow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl NormalizedMetadata {
    /// Content of the `<meta name="robots">` tag.
    pub fn robots(&self) -> &'static str {
        match (self.noindex, self.nofollow) {
            (false, false) => "index, follow",
            (true, false) => "noindex, follow",
            (false, true) => "index, nofollow",
            (true, true) => "noindex, nofollow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TwitterCardKind {
    Summary,
    SummaryLargeImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterCard {
    pub card: TwitterCardKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub image_alt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robots_flag_only_accepts_literal_one() {
        assert!(robots_flag(Some("1")));
        assert!(!robots_flag(Some("0")));
        assert!(!robots_flag(None));
        assert!(!robots_flag(Some("true")));
        assert!(!robots_flag(Some(" 1")));
        assert_eq!(robots_flag(Some("0")), robots_flag(None));
    }

    #[test]
    fn robots_directive_covers_all_combinations() {
        let mut meta = NormalizedMetadata {
            title: "t".into(),
            description: "d".into(),
            canonical_url: None,
            image: None,
            image_alt: "t".into(),
            noindex: false,
            nofollow: false,
            keywords: None,
        };
        assert_eq!(meta.robots(), "index, follow");
        meta.noindex = true;
        assert_eq!(meta.robots(), "noindex, follow");
        meta.nofollow = true;
        assert_eq!(meta.robots(), "noindex, nofollow");
        meta.noindex = false;
        assert_eq!(meta.robots(), "index, nofollow");
    }
}
