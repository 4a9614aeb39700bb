use chrono::Datelike;

use super::model::Record;
use crate::color::{hue_cycle, month_color_index, HueStop, MONTH_STOPS};

/// Records below this magnitude never take part in the monthly distribution.
pub const AGGREGATION_MIN_MAGNITUDE: f64 = 0.3;

/// Axis abbreviations, indexed by `month - 1`.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan.", "Feb.", "Mar.", "Apr.", "May.", "Jun.", "Jul.", "Aug.", "Sep.", "Oct.", "Nov.", "Dec.",
];

// ---------------------------------------------------------------------------
// MonthBucket – one calendar month of the distribution chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    /// Calendar month, 1–12. The year is ignored.
    pub month: u32,
    /// `"<abbr> (<count>)"`, e.g. `"Jan. (14)"`.
    pub label: String,
    /// Index into the 12-stop hue cycle.
    pub color_index: usize,
    pub color: HueStop,
    /// Matching records in input order.
    pub records: Vec<Record>,
}

impl MonthBucket {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn magnitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.magnitude)
    }
}

/// Partition records into twelve calendar-month buckets, January first.
///
/// Records with magnitude below [`AGGREGATION_MIN_MAGNITUDE`] are skipped.
/// Every month is present in the output, empty or not.
pub fn aggregate<'a, I>(records: I) -> Vec<MonthBucket>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut per_month: [Vec<Record>; 12] = Default::default();
    for rec in records {
        if rec.magnitude >= AGGREGATION_MIN_MAGNITUDE {
            per_month[rec.timestamp.month0() as usize].push(rec.clone());
        }
    }

    let stops = hue_cycle(MONTH_STOPS);
    per_month
        .into_iter()
        .zip(1u32..)
        .map(|(records, month)| {
            let color_index = month_color_index(month);
            MonthBucket {
                month,
                label: format!("{} ({})", MONTH_ABBREVIATIONS[month as usize - 1], records.len()),
                color_index,
                color: stops[color_index],
                records,
            }
        })
        .collect()
}
