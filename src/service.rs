//! Language switching and locale-aware list operations.

/// Payload retrieval for providers
pub mod fetcher;
/// Collation-based sorting and searching of records
pub mod list;
/// Localization service
pub mod localization;
/// Language-switch bookkeeping
pub mod state;

pub use fetcher::{
    FetchError,
    FsFetcher,
    PayloadFetcher,
};
pub use list::Record;
pub use localization::{
    LocalizationService,
    ServiceError,
};
pub use state::ServiceState;
