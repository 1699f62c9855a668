pub mod fetcher;
pub mod memory;
pub mod traits;

pub use fetcher::ApiClient;
pub use memory::InMemorySource;
pub use traits::ListingSource;
