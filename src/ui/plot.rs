use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, MarkerShape, Plot, PlotPoints, Points};

use airport_explorer::data::summary::{centroid, nearest};

use crate::state::AppState;

const PLOT_HEIGHT: f32 = 300.0;
const CENTER_SERIES: &str = "center";

// ---------------------------------------------------------------------------
// Airport counts by type
// ---------------------------------------------------------------------------

/// Bar chart of the filtered airports per type, most common first.
pub fn type_bar_chart(ui: &mut Ui, state: &AppState) {
    ui.heading(format!("Airport Types in {}", state.region_label()));

    if state.type_counts.is_empty() {
        ui.label("No data to display for the bar chart.");
        return;
    }

    Plot::new("type_counts")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Airport Type")
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (kind, count)) in state.type_counts.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64)
                    .width(0.7)
                    .name(kind.as_label());
                let chart = BarChart::new(vec![bar])
                    .name(kind.as_label())
                    .color(state.type_colors.color_for(kind));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Scatter of the filtered airports by longitude / latitude, coloured by
/// type, with the mean position marked.
pub fn airport_map(ui: &mut Ui, state: &AppState) {
    ui.heading("Map");

    let Some((mean_lat, mean_lon)) = centroid(&state.result) else {
        ui.label("No data to display on the map.");
        return;
    };

    // Degrees of longitude shrink with latitude; keep the map roughly true.
    let aspect = 1.0 / mean_lat.to_radians().cos().max(0.1);

    Plot::new("airport_map")
        .height(PLOT_HEIGHT * 1.5)
        .legend(Legend::default())
        .data_aspect(aspect as f32)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, point| {
            if name == CENTER_SERIES {
                return format!("center\nlon {:.4}\nlat {:.4}", point.x, point.y);
            }
            if name.is_empty() {
                return format!("lon {:.4}\nlat {:.4}", point.x, point.y);
            }
            match nearest(&state.result, point.y, point.x) {
                Some(r) => format!("{}\n{}\n{:.0} ft", r.name, r.kind, r.elevation_ft),
                None => name.to_string(),
            }
        })
        .show(ui, |plot_ui| {
            for (kind, _) in &state.type_counts {
                let points: PlotPoints = state
                    .result
                    .iter()
                    .filter(|r| &r.kind == kind)
                    .map(|r| [r.longitude, r.latitude])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(kind.as_label())
                        .color(state.type_colors.color_for(kind))
                        .radius(4.0),
                );
            }

            plot_ui.points(
                Points::new(std::iter::once([mean_lon, mean_lat]).collect::<PlotPoints>())
                    .name(CENTER_SERIES)
                    .shape(MarkerShape::Cross)
                    .color(Color32::WHITE)
                    .radius(6.0),
            );
        });
}
