use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use airport_explorer::data::RegionMode;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    if state.engine.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Region ----
            match state.config.region_mode {
                RegionMode::Single => {
                    ui.strong("Select State");
                    egui::ComboBox::from_id_salt("region_select")
                        .selected_text(&state.selected_region)
                        .show_ui(ui, |ui: &mut Ui| {
                            for region in &state.regions {
                                changed |= ui
                                    .selectable_value(
                                        &mut state.selected_region,
                                        region.clone(),
                                        region,
                                    )
                                    .changed();
                            }
                        });
                }
                RegionMode::Multi => {
                    ui.strong("States");
                    let regions = state.regions.clone();
                    ui.horizontal_wrapped(|ui: &mut Ui| {
                        for region in &regions {
                            let mut checked = state.selected_regions.contains(region);
                            if ui.checkbox(&mut checked, region).changed() {
                                state.toggle_region(region);
                            }
                        }
                    });
                }
            }
            ui.separator();

            // ---- Elevation range ----
            ui.strong("Elevation Range (ft)");
            let (lo, hi) = state.elevation_bounds;
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.elevation_min, lo..=hi)
                        .integer()
                        .text("min"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.elevation_max, lo..=hi)
                        .integer()
                        .text("max"),
                )
                .changed();
            ui.separator();

            // ---- Airport types ----
            let header = format!(
                "Airport Types  ({}/{})",
                state.selected_types.len(),
                state.available_types.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("type_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_types();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_types();
                        }
                    });

                    let types = state.available_types.clone();
                    for kind in &types {
                        let mut checked = state.selected_types.contains(kind);
                        let text =
                            RichText::new(kind.as_label()).color(state.type_colors.color_for(kind));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_type(kind);
                        }
                    }
                });
        });

    if changed {
        state.refilter();
    }
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

        if let Some(engine) = &state.engine {
            ui.label(format!(
                "{} airports loaded, {} match",
                engine.dataset().len(),
                state.result_count
            ));
        }

        if let Some(warning) = &state.config_warning {
            ui.separator();
            ui.label(RichText::new(warning).color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open airport data")
        .add_filter("Delimited text", &["csv", "tsv", "tab"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
