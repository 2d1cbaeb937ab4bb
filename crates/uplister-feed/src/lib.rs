pub mod error;
pub mod normalize;
pub mod placeholder;
pub mod pricing;
pub mod types;

pub use error::FeedError;
pub use normalize::{normalize_or_fallback, normalize_records, read_feed, FeedFallback};
pub use pricing::{base_price, derive_prices, list_price, DerivedPrices, PricingError};
pub use types::{RawPrice, RawProductRecord, RawSpecification, StringOrList};
