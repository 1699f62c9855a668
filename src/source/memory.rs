use crate::model::{FetchError, RawListing};
use crate::source::fetcher::listings_from_body;
use crate::source::traits::ListingSource;
use serde_json::Value;

/// Serves listings from a JSON dump instead of the network.
pub struct InMemorySource {
    listings: Vec<RawListing>,
}

impl InMemorySource {
    pub fn new(listings: Vec<RawListing>) -> Self {
        Self { listings }
    }

    pub fn from_json(body: Value) -> Result<Self, FetchError> {
        Ok(Self::new(listings_from_body(body)?))
    }
}

#[async_trait::async_trait]
impl ListingSource for InMemorySource {
    async fn fetch_all(&self) -> Result<Vec<RawListing>, FetchError> {
        Ok(self.listings.clone())
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<RawListing>, FetchError> {
        Ok(self
            .listings
            .iter()
            .find(|l| l.id.as_deref() == Some(id))
            .cloned())
    }
}
