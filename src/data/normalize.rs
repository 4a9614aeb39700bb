use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DatasetError;
use super::model::{RawRow, RawValue, Record};

/// Magnitude text the catalog uses when no magnitude could be computed.
pub const NOT_COMPUTABLE_SENTINEL: &str = "no calculable";

/// Canonical timestamp layout of the source catalog.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Source column names for each record field.
///
/// Defaults match the SSN (Servicio Sismológico Nacional) catalog export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub timestamp: String,
    /// When set, the timestamp column only holds the date and this column
    /// holds the time of day.
    pub time: Option<String>,
    pub magnitude: String,
    pub latitude: String,
    pub longitude: String,
    pub depth: String,
    pub location: String,
    pub status: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            timestamp: "Fecha".into(),
            time: None,
            magnitude: "Magnitud".into(),
            latitude: "Latitud".into(),
            longitude: "Longitud".into(),
            depth: "Profundidad".into(),
            location: "Referencia de localizacion".into(),
            status: "Estatus".into(),
        }
    }
}

impl ColumnMap {
    /// Columns without which no record can be built.
    pub fn required(&self) -> Vec<&str> {
        let mut cols = vec![self.timestamp.as_str(), self.magnitude.as_str()];
        if let Some(time) = &self.time {
            cols.push(time.as_str());
        }
        cols
    }

    /// Fail on the first required column absent from `headers`.
    pub fn check_headers<S: AsRef<str>>(&self, headers: &[S]) -> Result<(), DatasetError> {
        match self
            .required()
            .into_iter()
            .find(|col| !headers.iter().any(|h| h.as_ref() == *col))
        {
            Some(column) => Err(DatasetError::MissingColumn {
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization outcome
// ---------------------------------------------------------------------------

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Magnitude carried the "not computable" sentinel.
    NotComputable,
    /// Magnitude present but not a finite number.
    Unparseable(String),
    /// Magnitude cell absent or null.
    Missing,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotComputable => write!(f, "magnitude not computable"),
            RejectReason::Unparseable(raw) => write!(f, "magnitude '{raw}' is not a number"),
            RejectReason::Missing => write!(f, "magnitude missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Accepted(Record),
    Rejected(RejectReason),
}

/// Parse a raw magnitude cell into a finite number, or say why not.
pub fn parse_magnitude(raw: Option<&RawValue>) -> Result<f64, RejectReason> {
    let value = match raw {
        None | Some(RawValue::Null) => return Err(RejectReason::Missing),
        Some(RawValue::String(s)) if s.trim() == NOT_COMPUTABLE_SENTINEL => {
            return Err(RejectReason::NotComputable)
        }
        Some(RawValue::String(s)) if s.trim().is_empty() => return Err(RejectReason::Missing),
        Some(v) => v,
    };

    match value {
        RawValue::Float(_) | RawValue::Integer(_) | RawValue::String(_) => value
            .as_f64()
            .filter(|m| m.is_finite())
            .ok_or_else(|| RejectReason::Unparseable(value.to_string())),
        other => Err(RejectReason::Unparseable(other.to_string())),
    }
}

/// Parse the timestamp cell(s) of a row into UTC.
pub fn parse_timestamp(date: Option<&RawValue>, time: Option<&RawValue>) -> Option<DateTime<Utc>> {
    match (date?, time) {
        (RawValue::DateTime(dt), _) => Some(dt.and_utc()),
        (RawValue::String(d), None) => parse_text(d.trim()),
        (RawValue::String(d), Some(RawValue::String(t))) => {
            parse_text(&format!("{} {}", d.trim(), t.trim()))
        }
        _ => None,
    }
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}

/// Turn one raw row into a [`Record`], or reject it.
///
/// The magnitude is checked first; only rows that survive it need a valid
/// timestamp, and a bad one is fatal for the whole batch.
pub fn normalize_row(
    row: &RawRow,
    row_no: usize,
    columns: &ColumnMap,
) -> Result<Normalized, DatasetError> {
    let magnitude = match parse_magnitude(row.get(&columns.magnitude)) {
        Ok(m) => m,
        Err(reason) => return Ok(Normalized::Rejected(reason)),
    };

    let date = row.get(&columns.timestamp);
    let time = columns.time.as_ref().and_then(|c| row.get(c));
    let timestamp =
        parse_timestamp(date, time).ok_or_else(|| DatasetError::TimestampMalformed {
            row: row_no,
            raw: match (date, time) {
                (Some(d), Some(t)) => format!("{d} {t}"),
                (Some(d), None) => d.to_string(),
                (None, _) => "<missing>".into(),
            },
        })?;

    let number = |col: &str| row.get(col).and_then(RawValue::as_f64);
    let text = |col: &str| row.get(col).map(RawValue::as_text).unwrap_or_default();

    Ok(Normalized::Accepted(Record {
        timestamp,
        magnitude,
        latitude: number(&columns.latitude),
        longitude: number(&columns.longitude),
        depth: number(&columns.depth),
        location: text(&columns.location),
        status: text(&columns.status),
    }))
}
