//! Responsive image URL helpers.
//!
//! Sizing is requested from the image host through `w`, `h` and `q` query
//! parameters. A URL that cannot be parsed yields an empty string.

use metrics::counter;
use url::Url;

pub const DEFAULT_QUALITY: u8 = 85;
pub const MOBILE_BREAKPOINT_PX: u32 = 640;
pub const TABLET_BREAKPOINT_PX: u32 = 1024;

pub const DEFAULT_MOBILE_SIZE: &str = "100vw";
pub const DEFAULT_TABLET_SIZE: &str = "50vw";
pub const DEFAULT_DESKTOP_SIZE: &str = "33vw";

/// Set `key` the way `URLSearchParams.set` does: the first occurrence is
/// replaced in place, later duplicates are dropped, and a missing key is
/// appended.
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    match pairs.iter().position(|(existing, _)| existing == key) {
        Some(first) => {
            pairs[first].1 = value;
            let mut index = 0;
            pairs.retain(|(existing, _)| {
                let keep = index <= first || existing != key;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value)),
    }
}

/// Return `url` with `w`, `h` and `q` set; zero dimensions are treated as absent.
pub fn optimize_image_url(url: &str, width: Option<u32>, height: Option<u32>, quality: u8) -> String {
    if url.is_empty() {
        return String::new();
    }

    let mut parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(url, error = %err, "discarding unparseable image url");
            counter!("salon_seo_image_url_rejected_total").increment(1);
            return String::new();
        }
    };

    let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    if let Some(width) = width.filter(|width| *width > 0) {
        set_param(&mut pairs, "w", width.to_string());
    }
    if let Some(height) = height.filter(|height| *height > 0) {
        set_param(&mut pairs, "h", height.to_string());
    }
    set_param(&mut pairs, "q", quality.to_string());

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}

/// `srcset` attribute with one `"{url} {width}w"` descriptor per width, in order,
/// at [`DEFAULT_QUALITY`].
pub fn generate_srcset(base_url: &str, widths: &[u32]) -> String {
    generate_srcset_with_quality(base_url, widths, DEFAULT_QUALITY)
}

/// [`generate_srcset`] at an explicit `quality`, so every candidate matches
/// the `src` it accompanies.
pub fn generate_srcset_with_quality(base_url: &str, widths: &[u32], quality: u8) -> String {
    if base_url.is_empty() {
        return String::new();
    }

    widths
        .iter()
        .map(|width| {
            format!(
                "{} {width}w",
                optimize_image_url(base_url, Some(*width), None, quality)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `sizes` attribute for the three layout tiers.
pub fn image_sizes(mobile: &str, tablet: &str, desktop: &str) -> String {
    format!(
        "(max-width: {MOBILE_BREAKPOINT_PX}px) {mobile}, (max-width: {TABLET_BREAKPOINT_PX}px) {tablet}, {desktop}"
    )
}

/// [`image_sizes`] with the default one/two/three column layout.
pub fn default_image_sizes() -> String {
    image_sizes(DEFAULT_MOBILE_SIZE, DEFAULT_TABLET_SIZE, DEFAULT_DESKTOP_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimize_sets_requested_parameters() {
        let optimized = optimize_image_url("https://x.test/img.jpg", Some(400), Some(300), 85);
        let parsed = Url::parse(&optimized).expect("url");
        assert_eq!(parsed.scheme(), "https");
        assert_eq!(parsed.host_str(), Some("x.test"));
        assert_eq!(parsed.path(), "/img.jpg");

        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("w".to_string(), "400".to_string()),
                ("h".to_string(), "300".to_string()),
                ("q".to_string(), "85".to_string()),
            ]
        );
    }

    #[test]
    fn optimize_overwrites_existing_parameters_in_place() {
        let optimized = optimize_image_url(
            "https://cms.test/uploads/a.jpg?q=50&ver=2&w=10&w=20",
            Some(800),
            None,
            70,
        );
        assert_eq!(optimized, "https://cms.test/uploads/a.jpg?q=70&ver=2&w=800");
    }

    #[test]
    fn optimize_treats_zero_dimensions_as_absent() {
        let optimized = optimize_image_url("https://x.test/img.jpg", Some(0), Some(0), 85);
        assert_eq!(optimized, "https://x.test/img.jpg?q=85");
    }

    #[test]
    fn optimize_degrades_to_empty_string() {
        assert_eq!(optimize_image_url("", Some(400), None, 85), "");
        assert_eq!(optimize_image_url("not a url", Some(400), None, 85), "");
        assert_eq!(optimize_image_url("/relative/img.jpg", Some(400), None, 85), "");
    }

    #[test]
    fn srcset_preserves_width_order() {
        let srcset = generate_srcset("https://x.test/img.jpg", &[400, 800]);
        assert_eq!(
            srcset,
            "https://x.test/img.jpg?w=400&q=85 400w, https://x.test/img.jpg?w=800&q=85 800w"
        );
        assert_eq!(generate_srcset("", &[400]), "");
        assert_eq!(generate_srcset("https://x.test/img.jpg", &[]), "");
    }

    #[test]
    fn srcset_with_quality_applies_it_to_every_candidate() {
        let srcset = generate_srcset_with_quality("https://x.test/img.jpg?q=10", &[400, 800], 70);
        assert_eq!(
            srcset,
            "https://x.test/img.jpg?q=70&w=400 400w, https://x.test/img.jpg?q=70&w=800 800w"
        );
    }

    #[test]
    fn sizes_use_fixed_breakpoints() {
        assert_eq!(
            default_image_sizes(),
            "(max-width: 640px) 100vw, (max-width: 1024px) 50vw, 33vw"
        );
        assert_eq!(
            image_sizes("90vw", "45vw", "400px"),
            "(max-width: 640px) 90vw, (max-width: 1024px) 45vw, 400px"
        );
    }
}
