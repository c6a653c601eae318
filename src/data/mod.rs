/// Data layer: core types, loading/normalization, filtering, aggregation.
///
/// Architecture:
/// ```text
///  precios.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows softly → normalize per variant → cache
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PriceDataset  │  Vec<FuelRecord>, facet value sets (map + dashboard)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌────────────┐
///   │  filter   │ ───▶ │ aggregate  │  KPIs, time series, regional means,
///   └──────────┘      └────────────┘  map markers
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
