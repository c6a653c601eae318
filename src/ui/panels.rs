use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Top bar – file menu, page navigation, load status
// ---------------------------------------------------------------------------

/// Render the top menu / navigation bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let loaded_path = state.cache.loaded().map(|l| l.path.clone());
            if ui
                .add_enabled(loaded_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                if let Some(path) = loaded_path {
                    state.cache.invalidate();
                    state.open_file(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        for page in Page::ALL {
            if ui
                .selectable_label(state.page == page, page.label())
                .clicked()
            {
                state.page = page;
            }
        }

        ui.separator();

        if let Some(loaded) = state.cache.loaded() {
            ui.label(format!(
                "{} stations on map, {} dashboard rows ({} visible)",
                loaded.map.len(),
                loaded.dashboard.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – dashboard facet filters
// ---------------------------------------------------------------------------

/// Render the dashboard's facet filter panel.
pub fn facet_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dashboard_dataset() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year facet ----
            let header = format!("Year  ({}/{})", state.facets.years.len(), dataset.years.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("facet_year")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_years();
                        }
                        if ui.small_button("None").clicked() {
                            state.clear_years();
                        }
                    });
                    for year in &dataset.years {
                        let mut checked = state.facets.years.contains(year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            if checked {
                                state.facets.years.insert(*year);
                            } else {
                                state.facets.years.remove(year);
                            }
                            changed = true;
                        }
                    }
                });

            // ---- Month facet ----
            let header = format!(
                "Month  ({}/{})",
                state.facets.months.len(),
                dataset.months.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("facet_month")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_months();
                        }
                        if ui.small_button("None").clicked() {
                            state.clear_months();
                        }
                    });
                    for month in &dataset.months {
                        let mut checked = state.facets.months.contains(month);
                        if ui.checkbox(&mut checked, month.to_string()).changed() {
                            if checked {
                                state.facets.months.insert(*month);
                            } else {
                                state.facets.months.remove(month);
                            }
                            changed = true;
                        }
                    }
                });

            // ---- Department facet ----
            let header = format!(
                "Department  ({}/{})",
                state.facets.departments.len(),
                dataset.departments.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("facet_department")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_departments();
                        }
                        if ui.small_button("None").clicked() {
                            state.clear_departments();
                        }
                    });
                    for dept in &dataset.departments {
                        let mut checked = state.facets.departments.contains(dept);
                        if ui.checkbox(&mut checked, dept).changed() {
                            if checked {
                                state.facets.departments.insert(dept.clone());
                            } else {
                                state.facets.departments.remove(dept);
                            }
                            changed = true;
                        }
                    }
                });
        });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open GNCV price report")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
