use std::path::Path;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::RangeBounds;
use crate::state::{AppState, CentralView};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Left side panel – magnitude range + map
// ---------------------------------------------------------------------------

/// Render the left panel: the two-handle magnitude range and the map it drives.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Magnitude map");
    ui.separator();

    let Some((min, max)) = state.slider_range() else {
        ui.label("No catalog loaded.");
        return;
    };

    ui.label("Drag the sliders to change the magnitude range:");
    let mut low = state.bounds.low;
    let mut high = state.bounds.high;
    let step = state.config.slider_step;
    ui.add(
        egui::Slider::new(&mut low, min..=max)
            .step_by(step)
            .text("min"),
    );
    ui.add(
        egui::Slider::new(&mut high, min..=max)
            .step_by(step)
            .text("max"),
    );
    state.set_bounds(RangeBounds::new(low, high));

    if !state.bounds.is_ordered() {
        ui.label(RichText::new("min is above max: nothing to show").italics());
    }
    ui.separator();

    plot::magnitude_map(ui, state);
}

// ---------------------------------------------------------------------------
// Central view selector
// ---------------------------------------------------------------------------

pub fn view_selector(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(
            &mut state.view,
            CentralView::MonthlyDistribution,
            "Distribution by month",
        );
        ui.selectable_value(&mut state.view, CentralView::Table, "Catalog table");
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} events loaded ({} rejected), {} in range",
                ds.len(),
                ds.rejections().total(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open seismic catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load a catalog and install it; failures end up in the status line.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path, &state.config.columns) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} events from {} ({} rows rejected)",
                dataset.len(),
                path.display(),
                dataset.rejections().total()
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::dataset;

    #[test]
    fn failed_load_reports_status_and_keeps_previous_catalog() {
        let mut state = AppState::default();
        state.set_dataset(dataset(&[("2022-01-01 00:00:00", 3.5)]));

        load_into(&mut state, Path::new("/nonexistent/catalog.csv"));

        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|msg| msg.starts_with("Error: ")));
        assert_eq!(state.dataset.as_ref().map(|ds| ds.len()), Some(1));
    }
}
