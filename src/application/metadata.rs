//! Resolution of page metadata from editor overrides and computed fallbacks.
//!
//! Every field follows a fallback chain: the first candidate that is present
//! and non-empty wins. All functions here are total and side-effect free.

use crate::domain::seo::{ContentSeoOverride, NormalizedMetadata, TwitterCard, TwitterCardKind};
use crate::util::text::{strip_html, truncate_text};

pub const DEFAULT_DESCRIPTION_MAX_LEN: usize = 160;

fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
}

/// Merge `seo` overrides with the supplied fallbacks.
///
/// * title: Open Graph title → SEO title → `fallback_title`
/// * description: Open Graph description → meta description → `fallback_description`
/// * image: Open Graph image → `fallback_image`
/// * image alt: Open Graph image alt → resolved title
pub fn resolve_metadata(
    seo: Option<&ContentSeoOverride>,
    fallback_title: &str,
    fallback_description: &str,
    fallback_image: Option<&str>,
) -> NormalizedMetadata {
    let og = seo.map(|seo| &seo.open_graph);
    let og_image = og.and_then(|og| og.image.as_ref());

    let title = first_non_empty([
        og.and_then(|og| og.title.as_deref()),
        seo.and_then(|seo| seo.title.as_deref()),
    ])
    .unwrap_or(fallback_title)
    .to_string();

    let description = first_non_empty([
        og.and_then(|og| og.description.as_deref()),
        seo.and_then(|seo| seo.meta_description.as_deref()),
    ])
    .unwrap_or(fallback_description)
    .to_string();

    let image = first_non_empty([og_image.map(|image| image.url.as_str()), fallback_image])
        .map(str::to_string);

    let image_alt = first_non_empty([og_image.and_then(|image| image.alt_text.as_deref())])
        .map(str::to_string)
        .unwrap_or_else(|| title.clone());

    NormalizedMetadata {
        title,
        description,
        canonical_url: seo.and_then(|seo| seo.canonical_url.clone()),
        image,
        image_alt,
        noindex: seo.is_some_and(|seo| seo.robots_noindex),
        nofollow: seo.is_some_and(|seo| seo.robots_nofollow),
        keywords: seo.and_then(|seo| seo.focus_keyword.clone()),
    }
}

/// Twitter card fields, each falling back to the already resolved metadata.
pub fn resolve_twitter_card(
    seo: Option<&ContentSeoOverride>,
    metadata: &NormalizedMetadata,
) -> TwitterCard {
    let twitter = seo.map(|seo| &seo.twitter);
    let twitter_image = twitter.and_then(|twitter| twitter.image.as_ref());

    let title = first_non_empty([
        twitter.and_then(|twitter| twitter.title.as_deref()),
        Some(metadata.title.as_str()),
    ])
    .unwrap_or_default()
    .to_string();

    let description = first_non_empty([
        twitter.and_then(|twitter| twitter.description.as_deref()),
        Some(metadata.description.as_str()),
    ])
    .unwrap_or_default()
    .to_string();

    let own_image = first_non_empty([twitter_image.map(|image| image.url.as_str())]);
    let image = own_image
        .or(metadata.image.as_deref())
        .map(str::to_string);

    let image_alt = match own_image {
        Some(_) => first_non_empty([twitter_image.and_then(|image| image.alt_text.as_deref())])
            .unwrap_or(&title)
            .to_string(),
        None => metadata.image_alt.clone(),
    };

    let card = if image.is_some() {
        TwitterCardKind::SummaryLargeImage
    } else {
        TwitterCardKind::Summary
    };

    TwitterCard {
        card,
        title,
        description,
        image,
        image_alt,
    }
}

/// Plain-text description for a page, preferring the excerpt over the body.
///
/// Markup is stripped, surrounding whitespace trimmed and the result bounded
/// to `max_len` characters. This goes beyond plain strip-then-truncate: an
/// excerpt that is blank once tags and whitespace are gone counts as missing
/// and the body is used instead. Returns an empty string when neither source
/// has any text left.
pub fn generate_meta_description(content: Option<&str>, excerpt: Option<&str>, max_len: usize) -> String {
    [excerpt, content]
        .into_iter()
        .flatten()
        .map(strip_html)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .map(|text| truncate_text(&text, max_len))
        .unwrap_or_default()
}
