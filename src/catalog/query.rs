use crate::catalog::view::ListingView;
use serde::Serialize;
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Title,
}

#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub seller_id: Option<String>,
    pub sort: SortOrder,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            seller_id: None,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub items: Vec<ListingView>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl ListingQuery {
    pub fn matches(&self, view: &ListingView) -> bool {
        self.matches_search(view) && self.matches_category(view) && self.matches_seller(view)
    }

    fn matches_search(&self, view: &ListingView) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let term = term.to_lowercase();
        view.listing.title.to_lowercase().contains(&term)
            || view
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }

    fn matches_category(&self, view: &ListingView) -> bool {
        self.category
            .as_deref()
            .is_none_or(|c| view.listing.category.to_lowercase() == c.trim().to_lowercase())
    }

    fn matches_seller(&self, view: &ListingView) -> bool {
        self.seller_id
            .as_deref()
            .is_none_or(|id| view.seller_id() == Some(id))
    }
}

/// Filter, sort and slice one page out of `views`.
pub fn apply(views: Vec<ListingView>, query: &ListingQuery) -> Page {
    let mut matched: Vec<ListingView> = views.into_iter().filter(|v| query.matches(v)).collect();
    sort_views(&mut matched, query.sort);

    let page_size = query.page_size.max(1);
    let page = query.page.max(1);
    let total = matched.len();
    let total_pages = total.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let items = if start >= total {
        Vec::new()
    } else {
        matched.into_iter().skip(start).take(page_size).collect()
    };

    Page {
        items,
        page,
        page_size,
        total,
        total_pages,
    }
}

pub fn sort_views(views: &mut [ListingView], order: SortOrder) {
    match order {
        SortOrder::Newest => views.sort_by(|a, b| match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortOrder::PriceAsc => views.sort_by(|a, b| by_price(a, b, false)),
        SortOrder::PriceDesc => views.sort_by(|a, b| by_price(a, b, true)),
        SortOrder::Title => {
            views.sort_by_cached_key(|v| v.listing.title.to_lowercase());
        }
    }
}

// Price 0 means "on request" and sorts last either way.
fn by_price(a: &ListingView, b: &ListingView, descending: bool) -> Ordering {
    let (pa, pb) = (a.listing.price, b.listing.price);
    match (pa > 0.0, pb > 0.0) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
        (true, true) if descending => pb.total_cmp(&pa),
        (true, true) => pa.total_cmp(&pb),
    }
}
