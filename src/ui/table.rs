use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "Date (UTC)",
    "Time (UTC)",
    "Magnitude",
    "Latitude",
    "Longitude",
    "Depth (km)",
    "Location reference",
    "Status",
];

// ---------------------------------------------------------------------------
// Catalog table (central panel)
// ---------------------------------------------------------------------------

/// Every validated record, in dataset order.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No catalog loaded.");
        return;
    };
    if dataset.is_empty() {
        ui.label("The catalog has no events with a usable magnitude.");
        return;
    }
    let records = dataset.records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto(), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = &records[row.index()];
                let cells = [
                    rec.timestamp.format("%Y-%m-%d").to_string(),
                    rec.timestamp.format("%H:%M:%S").to_string(),
                    format!("{:.1}", rec.magnitude),
                    fmt_coord(rec.latitude),
                    fmt_coord(rec.longitude),
                    fmt_coord(rec.depth),
                    rec.location.clone(),
                    rec.status.clone(),
                ];
                for text in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(text);
                    });
                }
            });
        });
}

fn fmt_coord(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "–".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_render_with_placeholder() {
        assert_eq!(fmt_coord(Some(16.254)), "16.25");
        assert_eq!(fmt_coord(None), "–");
    }
}
