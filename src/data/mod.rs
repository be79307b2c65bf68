/// Data layer: core types, loading, cleaning and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop incomplete rows, truncate numerics,
///   └──────────┘  drop excluded platforms → SalesDataset
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  genre share, platform share, yearly counts, top 10
///   └───────────┘
/// ```

pub mod aggregate;
pub mod clean;
pub mod error;
pub mod loader;
pub mod model;
