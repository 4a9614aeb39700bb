use thiserror::Error;

/// Fatal failures while building a [`Dataset`](super::model::Dataset).
///
/// Rows whose magnitude is unusable are *not* errors; they are dropped and
/// counted (see [`RejectReason`](super::normalize::RejectReason)).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("row {row}: malformed timestamp '{raw}' (expected YYYY-MM-DD HH:MM:SS)")]
    TimestampMalformed { row: usize, raw: String },

    #[error("source is missing required column '{column}'")]
    MissingColumn { column: String },
}
