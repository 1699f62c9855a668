use crate::catalog::query::{apply, ListingQuery, Page};
use crate::catalog::view::{ListingView, SellerSummary};
use crate::model::{FetchError, RawListing};
use crate::source::ListingSource;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct SellerProfile {
    pub seller: SellerSummary,
    pub listings: Vec<ListingView>,
}

/// Fetches raw listings and turns them into views. Nothing is cached; every call
/// goes back to the source.
pub struct Catalog<S: ListingSource> {
    source: S,
    storage_base_url: String,
}

impl<S: ListingSource> Catalog<S> {
    pub fn new(source: S, storage_base_url: impl Into<String>) -> Self {
        Self {
            source,
            storage_base_url: storage_base_url.into(),
        }
    }

    fn view(&self, raw: &RawListing) -> ListingView {
        ListingView::from_raw(raw, &self.storage_base_url)
    }

    async fn all_views(&self) -> Result<Vec<ListingView>, FetchError> {
        let raws = self.source.fetch_all().await?;
        Ok(raws.iter().map(|raw| self.view(raw)).collect())
    }

    pub async fn browse(&self, query: &ListingQuery) -> Result<Page, FetchError> {
        let page = apply(self.all_views().await?, query);
        info!(
            "Page {}/{} | {} of {} listings",
            page.page,
            page.total_pages,
            page.items.len(),
            page.total
        );
        Ok(page)
    }

    pub async fn listing(&self, id: &str) -> Result<Option<ListingView>, FetchError> {
        let raw = self.source.fetch_one(id).await?;
        if raw.is_none() {
            warn!("Listing {} not found", id);
        }
        Ok(raw.map(|r| self.view(&r)))
    }

    /// Fetches several listings concurrently; results keep the order of `ids`.
    pub async fn listings(&self, ids: &[String]) -> Vec<Result<Option<ListingView>, FetchError>> {
        join_all(ids.iter().map(|id| self.listing(id))).await
    }

    /// `None` when the seller has no listings.
    pub async fn seller_profile(
        &self,
        seller_id: &str,
    ) -> Result<Option<SellerProfile>, FetchError> {
        let listings: Vec<ListingView> = self
            .all_views()
            .await?
            .into_iter()
            .filter(|v| v.seller_id() == Some(seller_id))
            .collect();

        let Some(seller) = listings.first().and_then(|v| v.seller.clone()) else {
            warn!("Seller {} has no listings", seller_id);
            return Ok(None);
        };

        info!("Seller {} has {} listings", seller.display_name, listings.len());
        Ok(Some(SellerProfile { seller, listings }))
    }
}
