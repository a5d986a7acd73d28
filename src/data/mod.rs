/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CompanyDataset (required columns checked)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ CompanyDataset │  Vec<CompanyRecord>, column names
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive metric bounds → filtered CompanyDataset
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
