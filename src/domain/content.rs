//! Content items as handed over by the content-fetch boundary.

use serde::Serialize;
use time::OffsetDateTime;

use super::{error::DomainError, seo::ContentSeoOverride};

pub const RATING_BEST: u8 = 5;
pub const RATING_WORST: u8 = 1;

/// A review score in `RATING_WORST..=RATING_BEST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (RATING_WORST..=RATING_BEST).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::invalid_argument(
                "rating",
                format!("{value} is outside {RATING_WORST}..={RATING_BEST}"),
            ))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbEntry {
    pub label: String,
    pub url: String,
}

impl BreadcrumbEntry {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAsset {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOffering {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub excerpt: Option<String>,
    /// Rich-text description as authored.
    pub description: Option<String>,
    pub price_text: Option<String>,
    pub duration_minutes: Option<u32>,
    pub image: Option<ImageAsset>,
    pub modified: Option<OffsetDateTime>,
    pub seo: Option<ContentSeoOverride>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub job_title: Option<String>,
    pub bio_short: Option<String>,
    pub bio_full: Option<String>,
    pub image: Option<ImageAsset>,
    pub modified: Option<OffsetDateTime>,
    pub seo: Option<ContentSeoOverride>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub rating: Rating,
    pub body: String,
    pub date_published: Option<String>,
    pub seo: Option<ContentSeoOverride>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Service,
    TeamMember,
    Testimonial,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::TeamMember => "team_member",
            Self::Testimonial => "testimonial",
        }
    }

    /// Listing section that owns the item's page, if it has one.
    pub fn section(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Service => Some(("Services", "/services")),
            Self::TeamMember => Some(("Team", "/team")),
            Self::Testimonial => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Service(ServiceOffering),
    Person(Person),
    Review(Review),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Service(_) => ContentKind::Service,
            Self::Person(_) => ContentKind::TeamMember,
            Self::Review(_) => ContentKind::Testimonial,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Service(service) => &service.name,
            Self::Person(person) => &person.name,
            Self::Review(review) => &review.title,
        }
    }

    pub fn seo(&self) -> Option<&ContentSeoOverride> {
        match self {
            Self::Service(service) => service.seo.as_ref(),
            Self::Person(person) => person.seo.as_ref(),
            Self::Review(review) => review.seo.as_ref(),
        }
    }

    /// Site-relative path of the item's own page.
    pub fn path(&self) -> Option<String> {
        let (_, section) = self.kind().section()?;
        let slug = match self {
            Self::Service(service) => &service.slug,
            Self::Person(person) => &person.slug,
            Self::Review(_) => return None,
        };
        Some(format!("{section}/{slug}"))
    }

    pub fn modified(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Service(service) => service.modified,
            Self::Person(person) => person.modified,
            Self::Review(_) => None,
        }
    }
}

/// All content retrieved in one fetch, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentCatalog {
    pub services: Vec<ServiceOffering>,
    pub team: Vec<Person>,
    pub testimonials: Vec<Review>,
}

impl ContentCatalog {
    /// Every item, services first, then team members, then testimonials.
    pub fn items(&self) -> Vec<ContentItem> {
        self.services
            .iter()
            .cloned()
            .map(ContentItem::Service)
            .chain(self.team.iter().cloned().map(ContentItem::Person))
            .chain(self.testimonials.iter().cloned().map(ContentItem::Review))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.services.len() + self.team.len() + self.testimonials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_one_through_five() {
        for value in 1..=5 {
            assert_eq!(Rating::new(value).expect("rating").get(), value);
        }
        assert!(Rating::new(0).is_err());
        assert!(Rating::try_from(6).is_err());
    }

    #[test]
    fn testimonials_have_no_page() {
        let review = ContentItem::Review(Review {
            id: "t1".into(),
            title: "Lovely".into(),
            author_name: "Ana".into(),
            rating: Rating::new(5).expect("rating"),
            body: "Great".into(),
            date_published: None,
            seo: None,
        });
        assert_eq!(review.kind(), ContentKind::Testimonial);
        assert!(review.path().is_none());
    }
}
