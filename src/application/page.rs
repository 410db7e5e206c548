//! Page head assembly: metadata, social cards, images and JSON-LD per item.

use metrics::counter;
use serde::Serialize;
use url::Url;

use crate::application::images::{
    default_image_sizes, generate_srcset_with_quality, optimize_image_url,
};
use crate::application::metadata::{
    generate_meta_description, resolve_metadata, resolve_twitter_card,
};
use crate::application::structured_data::{
    PersonSchemaInput, ServiceSchemaInput, StructuredData, build_aggregate_rating_schema,
    build_breadcrumb_schema, build_person_schema, build_review_schema, build_service_schema,
};
use crate::config::Settings;
use crate::domain::business::BusinessIdentity;
use crate::domain::content::{
    BreadcrumbEntry, ContentItem, ContentKind, ImageAsset, Person, Review, ServiceOffering,
};
use crate::domain::error::DomainError;
use crate::domain::seo::{NormalizedMetadata, TwitterCard};
use crate::util::text::truncate_text;

/// Deployment context shared by every page of the site.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub base_url: Url,
    pub site_name: String,
    pub business: BusinessIdentity,
    pub description_max_len: usize,
    pub image_quality: u8,
    pub srcset_widths: Vec<u32>,
}

impl SiteContext {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            base_url: settings.site.base_url.clone(),
            site_name: settings.site.name.clone(),
            business: settings.business.clone(),
            description_max_len: settings.seo.description_max_length,
            image_quality: settings.images.quality,
            srcset_widths: settings.images.srcset_widths.clone(),
        }
    }

    /// Absolute URL for a site-relative `path`.
    pub fn absolute_url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path == "/" || path.is_empty() {
            base.to_string()
        } else if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveImage {
    pub src: String,
    pub srcset: String,
    pub sizes: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Everything a template needs to populate a page `<head>`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageHead {
    pub kind: ContentKind,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub metadata: NormalizedMetadata,
    pub robots: &'static str,
    pub twitter: TwitterCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ResponsiveImage>,
    pub structured_data: Vec<StructuredData>,
}

#[derive(Debug, Clone)]
pub struct PageHeadService {
    site: SiteContext,
}

impl PageHeadService {
    pub fn new(site: SiteContext) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteContext {
        &self.site
    }

    pub fn describe(&self, item: &ContentItem) -> PageHead {
        let kind = item.kind();
        counter!("salon_seo_page_heads_total", "kind" => kind.as_str()).increment(1);

        let path = item.path();
        let page_url = path.as_deref().map(|path| self.site.absolute_url(path));
        let max_len = self.site.description_max_len;

        let (fallback_description, image, schema) = match item {
            ContentItem::Service(service) => {
                let description = generate_meta_description(
                    service.description.as_deref(),
                    service.excerpt.as_deref(),
                    max_len,
                );
                let schema = self.service_schema(service, page_url.as_deref().unwrap_or_default());
                (description, service.image.as_ref(), schema)
            }
            ContentItem::Person(person) => {
                let description = generate_meta_description(
                    person.bio_full.as_deref(),
                    person.bio_short.as_deref(),
                    max_len,
                );
                let schema = self.person_schema(person, page_url.as_deref().unwrap_or_default());
                (description, person.image.as_ref(), schema)
            }
            ContentItem::Review(review) => {
                let description = generate_meta_description(Some(&review.body), None, max_len);
                (description, None, self.review_schema(review))
            }
        };

        let seo = item.seo();
        let fallback_image = image.map(|image| image.url.as_str());
        let mut metadata = resolve_metadata(seo, item.title(), &fallback_description, fallback_image);
        metadata.description = truncate_text(&metadata.description, max_len);
        if metadata.canonical_url.as_deref().is_none_or(str::is_empty) {
            metadata.canonical_url = page_url.clone();
        }

        let twitter = resolve_twitter_card(seo, &metadata);

        let mut structured_data = vec![schema];
        if let Some(path) = path.as_deref() {
            let trail = self.breadcrumbs(item, path);
            structured_data.push(build_breadcrumb_schema(&trail).into());
        }

        PageHead {
            kind,
            id: item_id(item).to_string(),
            path,
            robots: metadata.robots(),
            twitter,
            image: image.and_then(|image| self.responsive_image(image, &metadata.title)),
            metadata,
            structured_data,
        }
    }

    pub fn describe_all<'a, I>(&self, items: I) -> Vec<PageHead>
    where
        I: IntoIterator<Item = &'a ContentItem>,
    {
        items.into_iter().map(|item| self.describe(item)).collect()
    }

    /// AggregateRating over `reviews`, or `None` when there are none.
    pub fn aggregate_rating(&self, reviews: &[Review]) -> Result<Option<StructuredData>, DomainError> {
        if reviews.is_empty() {
            return Ok(None);
        }

        let ratings: Vec<f64> = reviews
            .iter()
            .map(|review| f64::from(review.rating.get()))
            .collect();
        let count = u32::try_from(reviews.len()).map_err(|_| {
            DomainError::invalid_argument("reviews", "review count exceeds u32::MAX")
        })?;

        build_aggregate_rating_schema(&ratings, count).map(|schema| Some(schema.into()))
    }

    /// Upstream breadcrumbs when supplied, otherwise Home → section → item.
    pub fn breadcrumbs(&self, item: &ContentItem, path: &str) -> Vec<BreadcrumbEntry> {
        if let Some(trail) = item
            .seo()
            .and_then(|seo| seo.breadcrumbs.as_ref())
            .filter(|trail| !trail.is_empty())
        {
            return trail.clone();
        }

        let mut trail = vec![BreadcrumbEntry::new("Home", self.site.absolute_url("/"))];
        if let Some((label, section_path)) = item.kind().section() {
            trail.push(BreadcrumbEntry::new(label, self.site.absolute_url(section_path)));
        }
        trail.push(BreadcrumbEntry::new(item.title(), self.site.absolute_url(path)));
        trail
    }

    fn service_schema(&self, service: &ServiceOffering, page_url: &str) -> StructuredData {
        let description = service
            .description
            .as_deref()
            .filter(|text| !text.is_empty())
            .or(service.excerpt.as_deref())
            .unwrap_or_default();

        build_service_schema(
            ServiceSchemaInput {
                title: &service.name,
                description,
                price_text: service.price_text.as_deref(),
                duration_minutes: service.duration_minutes,
                image_url: service.image.as_ref().map(|image| image.url.as_str()),
                page_url,
            },
            &self.site.business,
        )
        .into()
    }

    fn person_schema(&self, person: &Person, page_url: &str) -> StructuredData {
        build_person_schema(
            PersonSchemaInput {
                name: &person.name,
                job_title: person.job_title.as_deref(),
                description: person.bio_short.as_deref(),
                image_url: person.image.as_ref().map(|image| image.url.as_str()),
                page_url,
            },
            &self.site.business,
        )
        .into()
    }

    fn review_schema(&self, review: &Review) -> StructuredData {
        build_review_schema(
            &review.author_name,
            review.rating,
            &review.body,
            review.date_published.as_deref(),
            &self.site.business,
        )
        .into()
    }

    fn responsive_image(&self, image: &ImageAsset, title: &str) -> Option<ResponsiveImage> {
        let src = optimize_image_url(&image.url, None, None, self.site.image_quality);
        if src.is_empty() {
            return None;
        }

        Some(ResponsiveImage {
            src,
            srcset: generate_srcset_with_quality(
                &image.url,
                &self.site.srcset_widths,
                self.site.image_quality,
            ),
            sizes: default_image_sizes(),
            alt: image
                .alt_text
                .clone()
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| title.to_string()),
            width: image.width,
            height: image.height,
        })
    }
}

fn item_id(item: &ContentItem) -> &str {
    match item {
        ContentItem::Service(service) => &service.id,
        ContentItem::Person(person) => &person.id,
        ContentItem::Review(review) => &review.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::structured_data::SchemaType;
    use crate::domain::business::{CurrencyCode, PostalAddress};
    use crate::domain::content::Rating;
    use crate::domain::seo::ContentSeoOverride;

    fn service() -> PageHeadService {
        PageHeadService::new(SiteContext {
            base_url: Url::parse("https://studio.test/").expect("url"),
            site_name: "CG Aesthetics".into(),
            business: BusinessIdentity {
                name: "CG Aesthetics".into(),
                address: PostalAddress {
                    street_address: "Avenue des Alpes, 60".into(),
                    locality: "Montreux".into(),
                    region: None,
                    postal_code: None,
                    country: "CH".into(),
                },
                telephone: None,
                currency: CurrencyCode::parse("CHF").expect("currency"),
            },
            description_max_len: 40,
            image_quality: 80,
            srcset_widths: vec![400, 800],
        })
    }

    fn hydrafacial() -> ServiceOffering {
        ServiceOffering {
            id: "s1".into(),
            slug: "hydrafacial".into(),
            name: "Hydrafacial".into(),
            excerpt: None,
            description: Some("<p>A deep cleansing facial that leaves skin glowing for days.</p>".into()),
            price_text: Some("CHF 180".into()),
            duration_minutes: Some(60),
            image: Some(ImageAsset {
                url: "https://cms.test/hydra.jpg".into(),
                alt_text: None,
                width: Some(1200),
                height: Some(800),
            }),
            modified: None,
            seo: None,
        }
    }

    fn review(rating: u8) -> Review {
        Review {
            id: format!("t{rating}"),
            title: "Lovely".into(),
            author_name: "Ana".into(),
            rating: Rating::new(rating).expect("rating"),
            body: "Great".into(),
            date_published: None,
            seo: None,
        }
    }

    #[test]
    fn absolute_url_joins_paths() {
        let site = service().site().clone();
        assert_eq!(site.absolute_url("/"), "https://studio.test");
        assert_eq!(site.absolute_url("/services"), "https://studio.test/services");
        assert_eq!(site.absolute_url("team/ana"), "https://studio.test/team/ana");
    }

    #[test]
    fn service_head_uses_computed_fallbacks() {
        let head = service().describe(&ContentItem::Service(hydrafacial()));

        assert_eq!(head.kind, ContentKind::Service);
        assert_eq!(head.path.as_deref(), Some("/services/hydrafacial"));
        assert_eq!(head.metadata.title, "Hydrafacial");
        assert_eq!(head.metadata.description, "A deep cleansing facial that leaves s...");
        assert_eq!(
            head.metadata.canonical_url.as_deref(),
            Some("https://studio.test/services/hydrafacial")
        );
        assert_eq!(head.robots, "index, follow");

        let image = head.image.expect("image");
        assert_eq!(image.src, "https://cms.test/hydra.jpg?q=80");
        assert_eq!(
            image.srcset,
            "https://cms.test/hydra.jpg?w=400&q=80 400w, https://cms.test/hydra.jpg?w=800&q=80 800w"
        );
        assert_eq!(image.alt, "Hydrafacial");

        let types: Vec<SchemaType> = head
            .structured_data
            .iter()
            .map(StructuredData::schema_type)
            .collect();
        assert_eq!(types, vec![SchemaType::Service, SchemaType::BreadcrumbList]);
    }

    #[test]
    fn overrides_win_and_description_stays_bounded() {
        let mut offering = hydrafacial();
        offering.seo = Some(ContentSeoOverride {
            meta_description: Some("An editor-written description that is far too long".into()),
            canonical_url: Some("https://studio.test/hydra".into()),
            robots_nofollow: true,
            ..ContentSeoOverride::default()
        });

        let head = service().describe(&ContentItem::Service(offering));
        assert_eq!(head.metadata.description.chars().count(), 40);
        assert_eq!(head.metadata.canonical_url.as_deref(), Some("https://studio.test/hydra"));
        assert_eq!(head.robots, "index, nofollow");
    }

    #[test]
    fn default_breadcrumbs_walk_home_section_item() {
        let pages = service();
        let item = ContentItem::Service(hydrafacial());
        let trail = pages.breadcrumbs(&item, "/services/hydrafacial");
        assert_eq!(
            trail,
            vec![
                BreadcrumbEntry::new("Home", "https://studio.test"),
                BreadcrumbEntry::new("Services", "https://studio.test/services"),
                BreadcrumbEntry::new("Hydrafacial", "https://studio.test/services/hydrafacial"),
            ]
        );
    }

    #[test]
    fn upstream_breadcrumbs_take_precedence() {
        let mut offering = hydrafacial();
        offering.seo = Some(ContentSeoOverride {
            breadcrumbs: Some(vec![BreadcrumbEntry::new("Start", "https://studio.test")]),
            ..ContentSeoOverride::default()
        });
        let item = ContentItem::Service(offering);
        let trail = service().breadcrumbs(&item, "/services/hydrafacial");
        assert_eq!(trail, vec![BreadcrumbEntry::new("Start", "https://studio.test")]);
    }

    #[test]
    fn review_head_has_no_page_or_breadcrumbs() {
        let head = service().describe(&ContentItem::Review(review(5)));
        assert!(head.path.is_none());
        assert!(head.metadata.canonical_url.is_none());
        assert_eq!(head.structured_data.len(), 1);
        assert_eq!(head.structured_data[0].schema_type(), SchemaType::Review);
    }

    #[test]
    fn aggregate_rating_is_absent_for_no_reviews() {
        let pages = service();
        assert!(pages.aggregate_rating(&[]).expect("aggregate").is_none());

        let reviews = [review(5), review(5), review(4), review(5)];
        let aggregate = pages
            .aggregate_rating(&reviews)
            .expect("aggregate")
            .expect("present");
        match aggregate {
            StructuredData::AggregateRating(schema) => {
                assert_eq!(schema.rating_value, "4.8");
                assert_eq!(schema.review_count, 4);
            }
            other => panic!("unexpected schema {other:?}"),
        }
    }
}
