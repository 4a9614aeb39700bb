use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use super::error::DatasetError;
use super::normalize::{normalize_row, ColumnMap, Normalized, RejectReason};

// ---------------------------------------------------------------------------
// RawValue – a single cell of a source row
// ---------------------------------------------------------------------------

/// A loosely-typed cell as handed over by a loader, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Already-typed date-time (e.g. an Arrow timestamp column), taken as UTC.
    DateTime(NaiveDateTime),
    Null,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => write!(f, "{s}"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

impl RawValue {
    /// Numeric view of the cell; strings are parsed, everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Float(v) => Some(*v),
            RawValue::Integer(i) => Some(*i as f64),
            RawValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Text view of the cell; `Null` becomes the empty string.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Null => String::new(),
            RawValue::String(s) => s.trim().to_string(),
            other => other.to_string(),
        }
    }
}

/// One source row: column name → raw cell.
pub type RawRow = BTreeMap<String, RawValue>;

// ---------------------------------------------------------------------------
// Record – one validated seismic event
// ---------------------------------------------------------------------------

/// A validated event. `magnitude` is always finite once a record exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub magnitude: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub depth: Option<f64>,
    pub location: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Dataset – the immutable, ordered collection for a session
// ---------------------------------------------------------------------------

/// How many rows were dropped during construction, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionCounts {
    pub not_computable: usize,
    pub unparseable: usize,
    pub missing: usize,
}

impl RejectionCounts {
    fn record(&mut self, reason: &RejectReason) {
        match reason {
            RejectReason::NotComputable => self.not_computable += 1,
            RejectReason::Unparseable(_) => self.unparseable += 1,
            RejectReason::Missing => self.missing += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.not_computable + self.unparseable + self.missing
    }
}

/// All validated records of one load, in source row order.
///
/// Constructed once and never modified afterwards: there are no mutating
/// methods, so a `Dataset` behind an `Arc` can be read from any number of
/// threads. Reflecting new source data means building a new `Dataset`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    rejections: RejectionCounts,
}

impl Dataset {
    /// Normalize a full row-batch.
    ///
    /// Rejected rows are dropped and tallied. A retained row with a bad
    /// timestamp aborts the whole load; no partial dataset is returned.
    pub fn from_rows<I>(rows: I, columns: &ColumnMap) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut records = Vec::new();
        let mut rejections = RejectionCounts::default();

        for (row_no, row) in rows.into_iter().enumerate() {
            match normalize_row(&row, row_no, columns)? {
                Normalized::Accepted(record) => records.push(record),
                Normalized::Rejected(reason) => {
                    log::debug!("Row {row_no} rejected: {reason}");
                    rejections.record(&reason);
                }
            }
        }

        log::info!(
            "Dataset built: {} records kept, {} rejected ({} not computable, {} unparseable, {} missing)",
            records.len(),
            rejections.total(),
            rejections.not_computable,
            rejections.unparseable,
            rejections.missing,
        );

        Ok(Dataset {
            records,
            rejections,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn rejections(&self) -> RejectionCounts {
        self.rejections
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
