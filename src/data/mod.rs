/// Data layer: table types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ExperimentTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ ExperimentTable │  Vec<Row>, column names
///   └─────────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  group by (model, malicious, dataset_len) → Vec<Series>
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod model;

pub use aggregate::{build_series, Aggregation, AxisScale, Series, SeriesOptions};
pub use error::DataError;
pub use model::{ExperimentTable, MetadataValue, ModelOrder};
