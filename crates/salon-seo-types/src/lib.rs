//! Records delivered by the studio's headless content API.
//!
//! These mirror the GraphQL selection sets used by the site frontend field for
//! field (camelCase, nullable where the backend may return `null`). They carry
//! no behaviour; conversion into validated domain values happens in
//! `salon_seo::infra::graphql`.

use serde::{Deserialize, Serialize};

/// Standard GraphQL response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: T,
}

/// Relay-style list wrapper (`{ nodes: [...] }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub source_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MediaDetails {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedImageNode {
    pub source_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub media_details: Option<MediaDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub node: FeaturedImageNode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub text: String,
    pub url: String,
}

/// SEO plugin fields exposed on every public content type.
///
/// `metaRobotsNoindex` / `metaRobotsNofollow` arrive as strings (`"1"` means
/// set); they are normalised to booleans on ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta_desc: Option<String>,
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub opengraph_title: Option<String>,
    #[serde(default)]
    pub opengraph_description: Option<String>,
    #[serde(default)]
    pub opengraph_image: Option<ImageRef>,
    #[serde(default)]
    pub twitter_title: Option<String>,
    #[serde(default)]
    pub twitter_description: Option<String>,
    #[serde(default)]
    pub twitter_image: Option<ImageRef>,
    #[serde(default)]
    pub meta_robots_noindex: Option<String>,
    #[serde(default)]
    pub meta_robots_nofollow: Option<String>,
    #[serde(default)]
    pub focuskw: Option<String>,
    #[serde(default)]
    pub breadcrumbs: Option<Vec<Breadcrumb>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    #[serde(default)]
    pub service_description: Option<String>,
    #[serde(default)]
    pub service_duration: Option<u32>,
    #[serde(default)]
    pub service_price: Option<String>,
    #[serde(default)]
    pub featured_service: Option<bool>,
    #[serde(default)]
    pub bookable_online: Option<bool>,
    #[serde(default)]
    pub booking_notes: Option<String>,
    #[serde(default)]
    pub service_gallery: Option<Vec<ImageRef>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
    #[serde(default)]
    pub service_details: ServiceDetails,
    #[serde(default)]
    pub service_categories: Connection<ServiceCategory>,
    #[serde(default)]
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub specialty_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDetails {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub bio_short: Option<String>,
    #[serde(default)]
    pub bio_full: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub specialties: Option<Vec<Specialty>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
    #[serde(default)]
    pub team_member_details: TeamMemberDetails,
    #[serde(default)]
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedService {
    pub id: String,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialDetails {
    pub client_name: String,
    pub review_text: String,
    pub rating: f64,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub date_submitted: Option<String>,
    #[serde(default)]
    pub client_photo: Option<ImageRef>,
    #[serde(default)]
    pub service_related: Option<RelatedService>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub title: String,
    pub testimonial_details: TestimonialDetails,
    #[serde(default)]
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesResponse {
    pub services: Connection<Service>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembersResponse {
    pub team_members: Connection<TeamMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestimonialsResponse {
    pub testimonials: Connection<Testimonial>,
}

/// Union of the list queries, as produced by a single combined fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBundle {
    #[serde(default)]
    pub services: Connection<Service>,
    #[serde(default)]
    pub team_members: Connection<TeamMember>,
    #[serde(default)]
    pub testimonials: Connection<Testimonial>,
}
