use eframe::egui::{self, Color32, Ui};
use egui_plot::{MarkerShape, Plot, Points};

use crate::color::PriceScale;
use crate::data::aggregate::map_points;
use crate::data::filter::MapSelection;
use crate::data::model::{LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Map page – stations as a lon/lat scatter
// ---------------------------------------------------------------------------

/// Render the station map page.
pub fn page(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.map_dataset() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a price report to view the map  (File → Open…)");
        });
        return;
    };

    ui.heading("GNCV stations in Colombia");

    // ---- Department selector, "All departments" sentinel first ----
    egui::ComboBox::from_label("Department")
        .selected_text(state.map_selection.label().to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.map_selection == MapSelection::All, "All departments")
                .clicked()
            {
                state.map_selection = MapSelection::All;
            }
            for dept in &dataset.departments {
                let selected =
                    state.map_selection == MapSelection::Department(dept.clone());
                if ui.selectable_label(selected, dept).clicked() {
                    state.map_selection = MapSelection::Department(dept.clone());
                }
            }
        });

    let points = map_points(&dataset, &state.map_selection);
    let scale = PriceScale::from_prices(points.iter().filter_map(|p| p.price));

    Plot::new("station_map")
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(LON_MIN)
        .include_x(LON_MAX)
        .include_y(LAT_MIN)
        .include_y(LAT_MAX)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("lat {:.2}, lon {:.2}", value.y, value.x)
            } else {
                name.to_string()
            }
        })
        .show(ui, |plot_ui| {
            for point in &points {
                let color = scale
                    .map(|s| s.color_for(point.price))
                    .unwrap_or(Color32::RED);
                plot_ui.points(
                    Points::new(vec![[point.lon, point.lat]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0)
                        .color(color)
                        .name(&point.label),
                );
            }
        });

    ui.add_space(4.0);
    ui.small(
        "When a municipality has several reports, only the most recent one is shown. \
         Marker color reflects the published average price (green = cheap, red = expensive).",
    );
}
