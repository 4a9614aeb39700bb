use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray,
};
use arrow::datatypes::{DataType, TimeUnit};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, RawRow, RawValue};
use super::normalize::ColumnMap;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a seismic catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one event per line (SSN catalog export)
/// * `.json`    – `[{ "Fecha": "...", "Magnitud": 4.1, ... }, ...]`
/// * `.parquet` – flat scalar columns; timestamp columns may be typed
pub fn load_file(path: &Path, columns: &ColumnMap) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_csv(path, columns)?,
        "json" => read_json(path, columns)?,
        "parquet" | "pq" => read_parquet(path, columns)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    log::info!("Read {} rows from {} ({ext})", rows.len(), path.display());

    Dataset::from_rows(rows, columns)
        .with_context(|| format!("building dataset from {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Every column is kept as text; numeric fields are parsed during normalization.
fn read_csv(path: &Path, columns: &ColumnMap) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    columns.check_headers(&headers)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), csv_cell(value)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn csv_cell(s: &str) -> RawValue {
    if s.trim().is_empty() {
        RawValue::Null
    } else {
        RawValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
///
/// Required columns are checked against the union of keys over all objects.
fn read_json(path: &Path, columns: &ColumnMap) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRow> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.clone(), json_to_raw(val)))
                .collect())
        })
        .collect::<Result<Vec<RawRow>>>()?;

    if !rows.is_empty() {
        let keys: Vec<&String> = rows
            .iter()
            .flat_map(|row| row.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        columns.check_headers(&keys)?;
    }
    Ok(rows)
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => RawValue::Bool(*b),
        JsonValue::Null => RawValue::Null,
        other => RawValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Datetime columns arrive as typed values.
fn read_parquet(path: &Path, columns: &ColumnMap) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    columns.check_headers(&names)?;
    for field in builder.schema().fields() {
        if !is_supported_type(field.data_type()) {
            log::warn!(
                "Parquet column '{}' has unsupported type {:?}; its cells are read as null",
                field.name(),
                field.data_type()
            );
        }
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let raw: RawRow = names
                .iter()
                .zip(batch.columns())
                .map(|(name, col)| (name.clone(), extract_raw_value(col, row)))
                .collect();
            rows.push(raw);
        }
    }
    Ok(rows)
}

/// Arrow types [`extract_raw_value`] turns into something other than null.
fn is_supported_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
            | DataType::Boolean
            | DataType::Timestamp(_, _)
    )
}

fn downcast<T: 'static>(col: &ArrayRef) -> Option<&T> {
    col.as_any().downcast_ref::<T>()
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_raw_value(col: &ArrayRef, row: usize) -> RawValue {
    if col.is_null(row) {
        return RawValue::Null;
    }
    let value = match col.data_type() {
        DataType::Utf8 => {
            downcast::<StringArray>(col).map(|s| RawValue::String(s.value(row).to_string()))
        }
        DataType::LargeUtf8 => Some(RawValue::String(
            col.as_string::<i64>().value(row).to_string(),
        )),
        DataType::Int32 => {
            downcast::<Int32Array>(col).map(|a| RawValue::Integer(a.value(row) as i64))
        }
        DataType::Int64 => downcast::<Int64Array>(col).map(|a| RawValue::Integer(a.value(row))),
        DataType::Float32 => {
            downcast::<Float32Array>(col).map(|a| RawValue::Float(a.value(row) as f64))
        }
        DataType::Float64 => downcast::<Float64Array>(col).map(|a| RawValue::Float(a.value(row))),
        DataType::Boolean => downcast::<BooleanArray>(col).map(|a| RawValue::Bool(a.value(row))),
        DataType::Timestamp(unit, _) => {
            let dt = match unit {
                TimeUnit::Second => {
                    downcast::<TimestampSecondArray>(col).and_then(|a| a.value_as_datetime(row))
                }
                TimeUnit::Millisecond => downcast::<TimestampMillisecondArray>(col)
                    .and_then(|a| a.value_as_datetime(row)),
                TimeUnit::Microsecond => downcast::<TimestampMicrosecondArray>(col)
                    .and_then(|a| a.value_as_datetime(row)),
                TimeUnit::Nanosecond => downcast::<TimestampNanosecondArray>(col)
                    .and_then(|a| a.value_as_datetime(row)),
            };
            dt.map(RawValue::DateTime)
        }
        _ => None,
    };
    value.unwrap_or(RawValue::Null)
}
