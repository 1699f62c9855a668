// Catalog module: per-listing views, list queries and the fetch-backed service.

pub mod query;
pub mod service;
pub mod view;

pub use query::{apply, ListingQuery, Page, SortOrder};
pub use service::{Catalog, SellerProfile};
pub use view::{ListingView, SellerSummary};
