//! SEO metadata, schema.org structured data and responsive image helpers
//! for the studio's headless site.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;

pub mod util {
    pub mod text;
}
