//! Listing data layer for the marketplace front end.
//!
//! Raw listings come from the upstream API ([`source`]), go through the attribute
//! [`normalizer`], and are shaped into views for listing, detail and seller pages
//! ([`catalog`]).

pub mod catalog;
pub mod config;
pub mod display;
pub mod model;
pub mod normalizer;
pub mod source;
pub mod utils;

pub use model::{NormalizedListing, RawAttribute, RawListing};
pub use normalizer::normalize;
