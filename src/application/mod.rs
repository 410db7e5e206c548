pub mod error;
pub mod images;
pub mod metadata;
pub mod page;
pub mod sitemap;
pub mod structured_data;
