use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::{AppState, CentralView};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SismoApp {
    pub state: AppState,
}

impl SismoApp {
    /// Build the app, opening `config.data_file` right away when set.
    pub fn new(config: ViewerConfig) -> Self {
        let data_file = config.data_file.clone();
        let mut state = AppState::new(config);
        if let Some(path) = data_file {
            panels::load_into(&mut state, &path);
        }
        Self { state }
    }
}

impl eframe::App for SismoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: magnitude range + map ----
        egui::SidePanel::left("map_panel")
            .default_width(420.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: monthly chart or table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::view_selector(ui, &mut self.state);
            match self.state.view {
                CentralView::MonthlyDistribution => plot::monthly_chart(ui, &self.state),
                CentralView::Table => table::records_table(ui, &self.state),
            }
        });
    }
}
