pub mod mock;
pub mod repositories;

pub use mock::{MockMarketplaceService, RecordingListingSyncService};
pub use repositories::InMemoryProductRepository;
