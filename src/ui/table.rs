use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use airport_explorer::data::summary::PivotTable;

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Filtered airports
// ---------------------------------------------------------------------------

/// Table of the airports passing the current filters.
pub fn results_table(ui: &mut Ui, state: &AppState) {
    ui.heading(format!(
        "Airports in {} ({} found)",
        state.region_label(),
        state.result_count
    ));

    if state.result.is_empty() {
        ui.label(
            RichText::new("No airports match the selected criteria.").color(Color32::YELLOW),
        );
        return;
    }

    let records = state.result.records();
    ui.push_id("results_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(180.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .max_scroll_height(260.0)
            .header(20.0, |mut header| {
                for title in ["Name", "Type", "Elevation (ft)", "Category"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let r = &records[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.colored_label(state.type_colors.color_for(&r.kind), r.kind.as_label());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.0}", r.elevation_ft));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.elevation_category.as_deref().unwrap_or("–"));
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Type × elevation band
// ---------------------------------------------------------------------------

/// Pivot counts for the filtered airports.
pub fn pivot_table(ui: &mut Ui, pivot: &PivotTable) {
    if pivot.rows.is_empty() {
        return;
    }

    ui.push_id("pivot_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(140.0))
            .columns(Column::auto().at_least(70.0), pivot.columns.len())
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("Type");
                });
                for label in &pivot.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(label);
                    });
                }
            })
            .body(|mut body| {
                for kind in &pivot.rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(kind.as_label());
                        });
                        for label in &pivot.columns {
                            row.col(|ui: &mut Ui| {
                                ui.label(pivot.get(kind, label).to_string());
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Whole-dataset summary
// ---------------------------------------------------------------------------

pub fn summary_section(ui: &mut Ui, state: &AppState) {
    let Some(engine) = &state.engine else {
        return;
    };
    let summary = engine.summary();

    ui.heading("Summary: Large Airports");
    ui.label(format!(
        "Total large airports in dataset: {}",
        summary.large_airports
    ));

    ui.add_space(8.0);
    ui.heading("Airports by State");
    for (region, count) in &summary.by_region {
        ui.label(format!("{region}: {count} airports"));
    }
}
