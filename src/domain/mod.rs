//! Domain layer types and invariants.

pub mod business;
pub mod content;
pub mod error;
pub mod seo;
pub mod slug;
