//! Conversion of content API records into domain values.
//!
//! This is the only place that knows the upstream quirks: robots flags as
//! `"1"` strings, `0` meaning "no duration", naive `modified` timestamps, and
//! team members that may lack a slug.

use std::collections::HashSet;

use salon_seo_types as wire;
use serde_json::Value;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

use super::error::InfraError;
use crate::domain::content::{
    BreadcrumbEntry, ContentCatalog, ImageAsset, Person, Rating, Review, ServiceOffering,
};
use crate::domain::seo::{ContentSeoOverride, SocialCard, SocialImage, robots_flag};
use crate::domain::slug::{SlugError, generate_unique_slug};

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("testimonial `{id}` has rating {value}, expected a whole number from 1 to 5")]
    Rating { id: String, value: f64 },
    #[error("team member `{id}` has no usable slug: {source}")]
    Slug {
        id: String,
        #[source]
        source: SlugError,
    },
}

/// Parse a content bundle, with or without the GraphQL `data` envelope.
pub fn parse_bundle(json: &str) -> Result<wire::ContentBundle, InfraError> {
    let mut value: Value = serde_json::from_str(json)?;
    if let Some(data) = value.get_mut("data").map(Value::take) {
        value = data;
    }
    Ok(serde_json::from_value(value)?)
}

pub fn ingest_bundle(bundle: wire::ContentBundle) -> Result<ContentCatalog, IngestError> {
    let services: Vec<ServiceOffering> = bundle.services.nodes.into_iter().map(service).collect();

    let mut taken: HashSet<String> = bundle
        .team_members
        .nodes
        .iter()
        .filter_map(|record| record.slug.as_deref())
        .filter(|slug| !slug.trim().is_empty())
        .map(str::to_string)
        .collect();
    let team = bundle
        .team_members
        .nodes
        .into_iter()
        .map(|record| team_member(record, &mut taken))
        .collect::<Result<Vec<_>, _>>()?;

    let testimonials = bundle
        .testimonials
        .nodes
        .into_iter()
        .map(testimonial)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ContentCatalog {
        services,
        team,
        testimonials,
    })
}

pub fn seo_override(seo: wire::Seo) -> ContentSeoOverride {
    ContentSeoOverride {
        title: seo.title,
        meta_description: seo.meta_desc,
        canonical_url: seo.canonical,
        open_graph: SocialCard {
            title: seo.opengraph_title,
            description: seo.opengraph_description,
            image: seo.opengraph_image.map(social_image),
        },
        twitter: SocialCard {
            title: seo.twitter_title,
            description: seo.twitter_description,
            image: seo.twitter_image.map(social_image),
        },
        robots_noindex: robots_flag(seo.meta_robots_noindex.as_deref()),
        robots_nofollow: robots_flag(seo.meta_robots_nofollow.as_deref()),
        focus_keyword: seo.focuskw,
        breadcrumbs: seo.breadcrumbs.map(|trail| {
            trail
                .into_iter()
                .map(|crumb| BreadcrumbEntry::new(crumb.text, crumb.url))
                .collect()
        }),
    }
}

pub fn service(record: wire::Service) -> ServiceOffering {
    let details = record.service_details;
    ServiceOffering {
        modified: modified_at(&record.id, record.modified.as_deref()),
        id: record.id,
        slug: record.slug,
        name: record.title,
        excerpt: non_empty(record.excerpt),
        description: non_empty(details.service_description),
        price_text: non_empty(details.service_price),
        duration_minutes: details.service_duration.filter(|minutes| *minutes > 0),
        image: record.featured_image.map(featured_image),
        seo: record.seo.map(seo_override),
    }
}

/// Convert a team member, deriving a slug from the name when none is given.
///
/// `taken` must already hold every slug supplied upstream for the batch;
/// derived slugs are added to it as they are assigned.
pub fn team_member(
    record: wire::TeamMember,
    taken: &mut HashSet<String>,
) -> Result<Person, IngestError> {
    let slug = match non_empty(record.slug) {
        Some(slug) => slug,
        None => generate_unique_slug(&record.title, |candidate| {
            taken.insert(candidate.to_string())
        })
        .map_err(|source| IngestError::Slug {
            id: record.id.clone(),
            source,
        })?,
    };

    let details = record.team_member_details;
    Ok(Person {
        modified: modified_at(&record.id, record.modified.as_deref()),
        id: record.id,
        slug,
        name: record.title,
        job_title: non_empty(details.position),
        bio_short: non_empty(details.bio_short),
        bio_full: non_empty(details.bio_full),
        image: record.featured_image.map(featured_image),
        seo: record.seo.map(seo_override),
    })
}

pub fn testimonial(record: wire::Testimonial) -> Result<Review, IngestError> {
    let details = record.testimonial_details;
    let rating = rating(details.rating).ok_or_else(|| IngestError::Rating {
        id: record.id.clone(),
        value: details.rating,
    })?;

    Ok(Review {
        id: record.id,
        title: record.title,
        author_name: details.client_name,
        rating,
        body: details.review_text,
        date_published: non_empty(details.date_submitted),
        seo: record.seo.map(seo_override),
    })
}

fn rating(value: f64) -> Option<Rating> {
    if value.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&value) {
        return None;
    }
    Rating::new(value as u8).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn social_image(image: wire::ImageRef) -> SocialImage {
    SocialImage {
        url: image.source_url,
        alt_text: image.alt_text,
    }
}

fn featured_image(image: wire::FeaturedImage) -> ImageAsset {
    let node = image.node;
    let details = node.media_details.unwrap_or_default();
    ImageAsset {
        url: node.source_url,
        alt_text: non_empty(node.alt_text),
        width: details.width,
        height: details.height,
    }
}

/// Parse an upstream `modified` timestamp; naive values are taken as UTC.
fn modified_at(id: &str, value: Option<&str>) -> Option<OffsetDateTime> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(parsed);
    }

    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    match PrimitiveDateTime::parse(value, naive) {
        Ok(parsed) => Some(parsed.assume_utc()),
        Err(err) => {
            warn!(id, value, error = %err, "ignoring unparseable modified timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    const BUNDLE: &str = r#"{
        "data": {
            "services": {"nodes": [{
                "id": "s1",
                "title": "Hydrafacial",
                "slug": "hydrafacial",
                "excerpt": "",
                "modified": "2024-05-01T09:30:00",
                "featuredImage": {"node": {
                    "sourceUrl": "https://cms.test/hydra.jpg",
                    "altText": "",
                    "mediaDetails": {"width": 1200, "height": 800}
                }},
                "serviceDetails": {
                    "serviceDescription": "<p>Deep cleanse</p>",
                    "serviceDuration": 0,
                    "servicePrice": "CHF 180"
                },
                "seo": {
                    "title": "Hydrafacial in Montreux",
                    "metaRobotsNoindex": "1",
                    "metaRobotsNofollow": "0",
                    "opengraphImage": {"sourceUrl": "https://cms.test/og.jpg", "altText": "Room"},
                    "breadcrumbs": [{"text": "Home", "url": "https://studio.test/"}]
                }
            }]},
            "teamMembers": {"nodes": [
                {"id": "p1", "title": "Claire Dubois", "teamMemberDetails": {"position": "Lead"}},
                {"id": "p2", "title": "Claire Dubois", "teamMemberDetails": {}},
                {"id": "p3", "title": "Marc", "slug": "marc-b", "teamMemberDetails": {}}
            ]},
            "testimonials": {"nodes": [{
                "id": "t1",
                "title": "Lovely",
                "testimonialDetails": {
                    "clientName": "Ana",
                    "reviewText": "Great",
                    "rating": 5,
                    "dateSubmitted": "2024-03-01"
                }
            }]}
        }
    }"#;

    #[test]
    fn parse_bundle_accepts_envelope_and_bare_data() {
        let wrapped = parse_bundle(BUNDLE).expect("wrapped");
        assert_eq!(wrapped.services.nodes.len(), 1);

        let bare = parse_bundle(r#"{"testimonials": {"nodes": []}}"#).expect("bare");
        assert!(bare.testimonials.nodes.is_empty());

        assert!(matches!(parse_bundle("{"), Err(InfraError::Json(_))));
    }

    #[test]
    fn ingest_normalises_upstream_quirks() {
        let catalog = ingest_bundle(parse_bundle(BUNDLE).expect("bundle")).expect("catalog");
        assert_eq!(catalog.len(), 5);

        let service = &catalog.services[0];
        assert_eq!(service.excerpt, None);
        assert_eq!(service.duration_minutes, None);
        assert_eq!(service.price_text.as_deref(), Some("CHF 180"));
        assert_eq!(service.modified, Some(datetime!(2024-05-01 09:30 UTC)));

        let image = service.image.as_ref().expect("image");
        assert_eq!(image.alt_text, None);
        assert_eq!(image.width, Some(1200));

        let seo = service.seo.as_ref().expect("seo");
        assert!(seo.robots_noindex);
        assert!(!seo.robots_nofollow);
        assert_eq!(
            seo.open_graph.image,
            Some(SocialImage {
                url: "https://cms.test/og.jpg".into(),
                alt_text: Some("Room".into()),
            })
        );
        assert_eq!(seo.breadcrumbs.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn team_members_receive_unique_slugs() {
        let catalog = ingest_bundle(parse_bundle(BUNDLE).expect("bundle")).expect("catalog");
        let slugs: Vec<&str> = catalog.team.iter().map(|person| person.slug.as_str()).collect();
        assert_eq!(slugs, vec!["claire-dubois", "claire-dubois-2", "marc-b"]);
        assert_eq!(catalog.team[0].job_title.as_deref(), Some("Lead"));
    }

    #[test]
    fn derived_slugs_avoid_slugs_supplied_later_in_the_batch() {
        let bundle = parse_bundle(
            r#"{"teamMembers": {"nodes": [
                {"id": "p1", "title": "Claire Dubois", "teamMemberDetails": {}},
                {"id": "p2", "title": "Claire D.", "slug": "claire-dubois", "teamMemberDetails": {}}
            ]}}"#,
        )
        .expect("bundle");

        let catalog = ingest_bundle(bundle).expect("catalog");
        let slugs: Vec<&str> = catalog.team.iter().map(|person| person.slug.as_str()).collect();
        assert_eq!(slugs, vec!["claire-dubois-2", "claire-dubois"]);
    }

    #[test]
    fn robots_zero_and_absent_are_equivalent() {
        let zero = seo_override(wire::Seo {
            meta_robots_noindex: Some("0".into()),
            ..wire::Seo::default()
        });
        let absent = seo_override(wire::Seo::default());
        assert_eq!(zero.robots_noindex, absent.robots_noindex);
        assert!(!zero.robots_noindex);
    }

    #[test]
    fn testimonial_ratings_are_validated() {
        let record = |value: f64| wire::Testimonial {
            id: "t9".into(),
            title: "Review".into(),
            testimonial_details: wire::TestimonialDetails {
                client_name: "Ana".into(),
                review_text: "Fine".into(),
                rating: value,
                ..wire::TestimonialDetails::default()
            },
            seo: None,
        };

        assert_eq!(testimonial(record(4.0)).expect("review").rating.get(), 4);
        for bad in [0.0, 6.0, 4.5, -1.0, f64::NAN] {
            assert!(
                matches!(testimonial(record(bad)), Err(IngestError::Rating { .. })),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn modified_accepts_rfc3339_and_ignores_garbage() {
        assert_eq!(
            modified_at("x", Some("2024-05-01T09:30:00+02:00")),
            Some(datetime!(2024-05-01 09:30 +2))
        );
        assert_eq!(modified_at("x", Some("yesterday")), None);
        assert_eq!(modified_at("x", None), None);
    }
}
