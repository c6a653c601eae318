use chrono::NaiveDate;
use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::PriceScale;
use crate::data::aggregate::{price_summary, regional_comparison, time_series};
use crate::format::{format_cop, format_cop_opt};
use crate::state::{AppState, DashboardTab};

// ---------------------------------------------------------------------------
// Dashboard page – KPIs plus trend/regional charts
// ---------------------------------------------------------------------------

/// Render the analytic dashboard page.
pub fn page(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dashboard_dataset() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a price report to view the dashboard  (File → Open…)");
        });
        return;
    };

    ui.heading("GNCV price dashboard");
    ui.label("Regional variation, temporal trends and key indicators for the current filters.");
    ui.add_space(8.0);

    // ---- KPI metrics ----
    let summary = price_summary(&dataset, &state.visible_indices);
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Average price", summary.map(|s| s.mean));
        metric(&mut cols[1], "Minimum price", summary.map(|s| s.min));
        metric(&mut cols[2], "Maximum price", summary.map(|s| s.max));
    });
    ui.separator();

    if state.visible_indices.is_empty() {
        ui.label("No rows match the current filters.");
    }

    // ---- Chart tabs ----
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.dashboard_tab, DashboardTab::Trend, "Price trend");
        ui.selectable_value(
            &mut state.dashboard_tab,
            DashboardTab::Regional,
            "Regional comparison",
        );
    });
    ui.add_space(4.0);

    match state.dashboard_tab {
        DashboardTab::Trend => trend_chart(ui, &time_series(&dataset, &state.visible_indices)),
        DashboardTab::Regional => {
            regional_chart(ui, &regional_comparison(&dataset, &state.visible_indices))
        }
    }
}

/// One KPI metric: small label on top, big formatted value below.
fn metric(ui: &mut Ui, label: &str, value: Option<f64>) {
    ui.label(label);
    ui.label(RichText::new(format_cop_opt(value)).heading().strong());
}

// ---------------------------------------------------------------------------
// Trend tab
// ---------------------------------------------------------------------------

fn trend_chart(ui: &mut Ui, series: &[(NaiveDate, f64)]) {
    use chrono::Datelike;

    ui.strong("Average daily GNCV price");

    let points: Vec<[f64; 2]> = series
        .iter()
        .map(|&(date, mean)| [date.num_days_from_ce() as f64, mean])
        .collect();

    Plot::new("trend_chart")
        .x_axis_label("Date")
        .y_axis_label("Price ($)")
        .x_axis_formatter(|mark, _range| format_day_number(mark.value))
        .label_formatter(|_name, value| {
            format!("{}\n{}", format_day_number(value.x), format_cop(value.y))
        })
        .show(ui, |plot_ui| {
            let line_points: PlotPoints = points.iter().copied().collect();
            plot_ui.line(Line::new(line_points).width(1.5));
            // Per-day markers, mirroring the original's marked line chart.
            let marker_points: PlotPoints = points.iter().copied().collect();
            plot_ui.points(
                Points::new(marker_points)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(3.0),
            );
        });
}

/// Render a day number (days since the common era) back as `YYYY-MM-DD`.
fn format_day_number(value: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Regional tab
// ---------------------------------------------------------------------------

fn regional_chart(ui: &mut Ui, rows: &[(String, f64)]) {
    ui.strong("Average price by department");

    let scale = PriceScale::from_prices(rows.iter().map(|(_, mean)| *mean));
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, (dept, mean))| {
            let mut bar = Bar::new(i as f64, *mean).name(dept);
            if let Some(scale) = scale {
                bar = bar.fill(scale.color_for(Some(*mean)));
            }
            bar
        })
        .collect();

    let names: Vec<String> = rows.iter().map(|(dept, _)| dept.clone()).collect();

    Plot::new("regional_chart")
        .height(300.0)
        .x_axis_label("Department")
        .y_axis_label("Average price ($)")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                names.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .label_formatter(|name, value| {
            if name.is_empty() {
                format_cop(value.y)
            } else {
                format!("{name}\n{}", format_cop(value.y))
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    ui.add_space(8.0);

    // Same ranking as a table, highest mean first.
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Department");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Mean price");
            });
        })
        .body(|mut body| {
            for (dept, mean) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(dept);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_cop(*mean));
                    });
                });
            }
        });
}
