/// Data layer: core types, loading, range queries and monthly aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  RawRow → Record | rejected
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  immutable Vec<Record>, built once per load
///   └──────────┘
///      │      │
///      ▼      ▼
///  ┌────────┐ ┌───────────┐
///  │ filter │ │ aggregate │  magnitude range / 12 month buckets
///  └────────┘ └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;

#[cfg(test)]
pub(crate) mod test_support {
    use super::model::{Dataset, RawRow, RawValue};
    use super::normalize::ColumnMap;

    /// A row in the default SSN column layout with only timestamp and magnitude.
    pub fn row(timestamp: &str, magnitude: RawValue) -> RawRow {
        let mut row = RawRow::new();
        row.insert("Fecha".into(), RawValue::String(timestamp.into()));
        row.insert("Magnitud".into(), magnitude);
        row
    }

    /// Dataset from `(timestamp, magnitude)` pairs, all accepted.
    pub fn dataset(events: &[(&str, f64)]) -> Dataset {
        let rows = events
            .iter()
            .map(|(ts, mag)| row(ts, RawValue::Float(*mag)));
        Dataset::from_rows(rows, &ColumnMap::default()).unwrap()
    }
}
