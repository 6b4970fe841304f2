/// Data layer: core types, loading, and the pure analysis functions.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///   ┌──────────┐
///   │  loader  │  format check, parse, type cells → Dataset
///   └──────────┘
///          │
///          ▼
///   ┌──────────┐
///   │ classify │  first record → numeric / categorical columns
///   └──────────┘
///          │
///     ┌────┴─────┐
///     ▼          ▼
///  ┌───────┐  ┌──────┐
///  │ stats │  │ view │
///  └───────┘  └──────┘
///   sum/avg    chart window
///   top-N      prefix
///   categories
///     └────┬─────┘
///          ▼
///   ┌──────────┐
///   │ analysis │  everything above, once per dataset
///   └──────────┘
/// ```

pub mod analysis;
pub mod classify;
pub mod loader;
pub mod model;
pub mod stats;
pub mod view;
