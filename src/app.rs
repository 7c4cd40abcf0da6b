use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AirportExplorerApp {
    pub state: AppState,
}

impl AirportExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AirportExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.engine.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open an airport file to begin  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    table::results_table(ui, &self.state);
                    if let Some(pivot) = &self.state.pivot {
                        ui.add_space(8.0);
                        table::pivot_table(ui, pivot);
                    }
                    ui.separator();
                    plot::type_bar_chart(ui, &self.state);
                    ui.separator();
                    plot::airport_map(ui, &self.state);
                    ui.separator();
                    table::summary_section(ui, &self.state);
                });
        });
    }
}
