//! schema.org structured data (JSON-LD) for studio content.
//!
//! Each top-level schema kind is its own record implementing [`JsonLd`];
//! [`StructuredData`] is the closed set handed to page templates. Builders are
//! deterministic and perform no I/O. The business behind the site is injected
//! as a [`BusinessIdentity`] rather than baked in.

use serde::{Serialize, Serializer};

use crate::domain::business::BusinessIdentity;
use crate::domain::content::{BreadcrumbEntry, RATING_BEST, RATING_WORST, Rating};
use crate::domain::error::DomainError;
use crate::util::text::strip_html;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaType {
    Service,
    Person,
    Review,
    BreadcrumbList,
    AggregateRating,
    BeautySalon,
    PostalAddress,
    Offer,
    Rating,
    ListItem,
}

/// Serialises as the schema.org context URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaContext;

impl Serialize for SchemaContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(SCHEMA_CONTEXT)
    }
}

/// Top-level JSON-LD document.
pub trait JsonLd: Serialize {
    const SCHEMA_TYPE: SchemaType;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddressSchema {
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub street_address: String,
    pub address_locality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub address_country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessSchema {
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub name: String,
    pub address: PostalAddressSchema,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

impl BusinessSchema {
    /// Full identity, used where the business is the provider.
    pub fn provider(business: &BusinessIdentity) -> Self {
        let address = &business.address;
        Self {
            kind: SchemaType::BeautySalon,
            name: business.name.clone(),
            address: PostalAddressSchema {
                kind: SchemaType::PostalAddress,
                street_address: address.street_address.clone(),
                address_locality: address.locality.clone(),
                address_region: address.region.clone(),
                postal_code: address.postal_code.clone(),
                address_country: address.country.clone(),
            },
            telephone: business.telephone.clone(),
        }
    }

    /// Short reference: name, street, locality and country.
    pub fn reference(business: &BusinessIdentity) -> Self {
        let address = &business.address;
        Self {
            kind: SchemaType::BeautySalon,
            name: business.name.clone(),
            address: PostalAddressSchema {
                kind: SchemaType::PostalAddress,
                street_address: address.street_address.clone(),
                address_locality: address.locality.clone(),
                address_region: None,
                postal_code: None,
                address_country: address.country.clone(),
            },
            telephone: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSchema {
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub price: String,
    pub price_currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSchema {
    #[serde(rename = "@context")]
    pub context: SchemaContext,
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub name: String,
    pub description: String,
    pub url: String,
    pub provider: BusinessSchema,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<OfferSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl JsonLd for ServiceSchema {
    const SCHEMA_TYPE: SchemaType = SchemaType::Service;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonReference {
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSchema {
    #[serde(rename = "@context")]
    pub context: SchemaContext,
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub url: String,
    pub works_for: BusinessSchema,
}

impl JsonLd for PersonSchema {
    const SCHEMA_TYPE: SchemaType = SchemaType::Person;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSchema {
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub rating_value: Rating,
    pub best_rating: u8,
    pub worst_rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSchema {
    #[serde(rename = "@context")]
    pub context: SchemaContext,
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub author: PersonReference,
    pub review_rating: RatingSchema,
    pub review_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    pub item_reviewed: BusinessSchema,
}

impl JsonLd for ReviewSchema {
    const SCHEMA_TYPE: SchemaType = SchemaType::Review;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRatingSchema {
    #[serde(rename = "@context")]
    pub context: SchemaContext,
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    /// Mean rating with one decimal place.
    pub rating_value: String,
    pub review_count: u32,
    pub best_rating: u8,
    pub worst_rating: u8,
}

impl JsonLd for AggregateRatingSchema {
    const SCHEMA_TYPE: SchemaType = SchemaType::AggregateRating;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItemSchema {
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    /// 1-based position in the trail.
    pub position: usize,
    pub name: String,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbListSchema {
    #[serde(rename = "@context")]
    pub context: SchemaContext,
    #[serde(rename = "@type")]
    pub kind: SchemaType,
    pub item_list_element: Vec<ListItemSchema>,
}

impl JsonLd for BreadcrumbListSchema {
    const SCHEMA_TYPE: SchemaType = SchemaType::BreadcrumbList;
}

/// Any top-level structured-data document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StructuredData {
    Service(ServiceSchema),
    Person(PersonSchema),
    Review(ReviewSchema),
    BreadcrumbList(BreadcrumbListSchema),
    AggregateRating(AggregateRatingSchema),
}

impl StructuredData {
    pub fn schema_type(&self) -> SchemaType {
        match self {
            Self::Service(_) => ServiceSchema::SCHEMA_TYPE,
            Self::Person(_) => PersonSchema::SCHEMA_TYPE,
            Self::Review(_) => ReviewSchema::SCHEMA_TYPE,
            Self::BreadcrumbList(_) => BreadcrumbListSchema::SCHEMA_TYPE,
            Self::AggregateRating(_) => AggregateRatingSchema::SCHEMA_TYPE,
        }
    }

    /// Compact JSON safe to place inside `<script type="application/ld+json">`.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        to_script_json(self)
    }
}

macro_rules! impl_from_schema {
    ($($schema:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$schema> for StructuredData {
                fn from(schema: $schema) -> Self {
                    Self::$variant(schema)
                }
            }
        )*
    };
}

impl_from_schema! {
    ServiceSchema => Service,
    PersonSchema => Person,
    ReviewSchema => Review,
    BreadcrumbListSchema => BreadcrumbList,
    AggregateRatingSchema => AggregateRating,
}

/// Serialise `value` to compact JSON with `<`, `>` and `&` escaped.
///
/// Those characters only occur inside JSON strings, where the `\uXXXX` forms
/// are equivalent, so a `</script>` sequence can never close the tag early.
pub fn to_script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    let mut escaped = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            other => escaped.push(other),
        }
    }
    Ok(escaped)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// One-decimal rendering of a finite `value`, rounding the exact binary value
/// half up like JavaScript's `toFixed(1)`.
///
/// `4.35` is stored as `4.3499…` and renders `"4.3"`, whereas
/// `(value * 10.0).round()` would give `"4.4"`. Exact ties such as `4.25`
/// round up to `"4.3"`.
pub fn format_one_decimal(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    // `scaled + residual` is exactly `magnitude * 10`.
    let scaled = magnitude * 10.0;
    let residual = magnitude.mul_add(10.0, -scaled);
    let floor = scaled.floor();
    let above_half = (scaled - floor - 0.5) + residual;
    let tenths = if above_half >= 0.0 { floor + 1.0 } else { floor };
    let tenths = tenths as u64;

    format!("{sign}{}.{}", tenths / 10, tenths % 10)
}

/// Keep only ASCII digits and dots, e.g. `"CHF 120.50"` → `"120.50"`.
///
/// Ranges such as `"$99-150"` collapse to `"99150"`.
pub fn extract_price(price_text: &str) -> String {
    price_text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect()
}

/// ISO 8601 duration for a whole number of minutes.
pub fn iso_duration_minutes(minutes: u32) -> String {
    format!("PT{minutes}M")
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceSchemaInput<'a> {
    pub title: &'a str,
    /// Rich text; markup is stripped.
    pub description: &'a str,
    pub price_text: Option<&'a str>,
    pub duration_minutes: Option<u32>,
    pub image_url: Option<&'a str>,
    pub page_url: &'a str,
}

pub fn build_service_schema(
    service: ServiceSchemaInput<'_>,
    business: &BusinessIdentity,
) -> ServiceSchema {
    let offers = non_empty(service.price_text).map(|price_text| OfferSchema {
        kind: SchemaType::Offer,
        price: extract_price(price_text),
        price_currency: business.currency.as_str().to_string(),
    });

    ServiceSchema {
        context: SchemaContext,
        kind: SchemaType::Service,
        name: service.title.to_string(),
        description: strip_html(service.description),
        url: service.page_url.to_string(),
        provider: BusinessSchema::provider(business),
        image: non_empty(service.image_url).map(str::to_string),
        offers,
        duration: service
            .duration_minutes
            .filter(|minutes| *minutes > 0)
            .map(iso_duration_minutes),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PersonSchemaInput<'a> {
    pub name: &'a str,
    pub job_title: Option<&'a str>,
    /// Rich text; markup is stripped.
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub page_url: &'a str,
}

pub fn build_person_schema(
    person: PersonSchemaInput<'_>,
    business: &BusinessIdentity,
) -> PersonSchema {
    PersonSchema {
        context: SchemaContext,
        kind: SchemaType::Person,
        name: person.name.to_string(),
        job_title: non_empty(person.job_title).map(str::to_string),
        description: non_empty(person.description).map(strip_html),
        image: non_empty(person.image_url).map(str::to_string),
        url: person.page_url.to_string(),
        works_for: BusinessSchema::reference(business),
    }
}

pub fn build_review_schema(
    author_name: &str,
    rating: Rating,
    review_body: &str,
    date_published: Option<&str>,
    business: &BusinessIdentity,
) -> ReviewSchema {
    ReviewSchema {
        context: SchemaContext,
        kind: SchemaType::Review,
        author: PersonReference {
            kind: SchemaType::Person,
            name: author_name.to_string(),
        },
        review_rating: RatingSchema {
            kind: SchemaType::Rating,
            rating_value: rating,
            best_rating: RATING_BEST,
            worst_rating: RATING_WORST,
        },
        review_body: review_body.to_string(),
        date_published: non_empty(date_published).map(str::to_string),
        item_reviewed: BusinessSchema::reference(business),
    }
}

/// Aggregate of `ratings`, with the mean rendered by [`format_one_decimal`].
///
/// Fails with [`DomainError::InvalidArgument`] for an empty slice or a
/// non-finite rating instead of producing a NaN average.
pub fn build_aggregate_rating_schema(
    ratings: &[f64],
    review_count: u32,
) -> Result<AggregateRatingSchema, DomainError> {
    if ratings.is_empty() {
        return Err(DomainError::invalid_argument(
            "ratings",
            "at least one rating is required",
        ));
    }
    if let Some(bad) = ratings.iter().find(|rating| !rating.is_finite()) {
        return Err(DomainError::invalid_argument(
            "ratings",
            format!("rating {bad} is not a finite number"),
        ));
    }

    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;

    Ok(AggregateRatingSchema {
        context: SchemaContext,
        kind: SchemaType::AggregateRating,
        rating_value: format_one_decimal(mean),
        review_count,
        best_rating: RATING_BEST,
        worst_rating: RATING_WORST,
    })
}

pub fn build_breadcrumb_schema(entries: &[BreadcrumbEntry]) -> BreadcrumbListSchema {
    BreadcrumbListSchema {
        context: SchemaContext,
        kind: SchemaType::BreadcrumbList,
        item_list_element: entries
            .iter()
            .enumerate()
            .map(|(index, entry)| ListItemSchema {
                kind: SchemaType::ListItem,
                position: index + 1,
                name: entry.label.clone(),
                item: entry.url.clone(),
            })
            .collect(),
    }
}
