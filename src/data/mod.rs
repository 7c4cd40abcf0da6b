/// Data layer: core types, loading, enrichment, queries and summaries.
///
/// Architecture:
/// ```text
///  airports.csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  enrich   │  elevation_ft → elevation_category
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  QueryEngine  │  filter (+ optional cache), sort, counts
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  per-region counts, top-N, type × band pivot
///   └──────────┘
/// ```

pub mod cache;
pub mod enrich;
pub mod error;
pub mod loader;
pub mod model;
pub mod query;
pub mod summary;

pub use cache::{CacheStats, QueryCache, QueryEngine, DEFAULT_CACHE_CAPACITY};
pub use enrich::{enrich, Bucket, ElevationBuckets};
pub use error::DataError;
pub use loader::load;
pub use model::{AirportRecord, AirportType, Dataset};
pub use query::{AirportQuery, ElevationRange, RegionMode, RegionSelector};
