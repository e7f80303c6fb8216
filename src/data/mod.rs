/// Data layer: record types, loading, indexing and view selections.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ IndexedDataset  │  country → year → { gdp, life, pop }
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  line series, bubbles, table rows
///   └──────────┘
/// ```

pub mod index;
pub mod loader;
pub mod model;
pub mod query;

pub use index::IndexedDataset;
pub use model::{Country, Indicator, RawRecord, Record, RecordError, YearEntry, YearField};
