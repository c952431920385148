/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   CSV (URL or file)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → SalesTable (read-only)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  recession / single-year row predicates
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group-by mean / sum → SummaryTable per report slot
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
