use crate::model::{FetchError, RawListing};

/// Where raw listings come from. The HTTP client is the production source.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<RawListing>, FetchError>;

    /// `Ok(None)` when the listing does not exist.
    async fn fetch_one(&self, id: &str) -> Result<Option<RawListing>, FetchError>;
}
