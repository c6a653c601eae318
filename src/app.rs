use eframe::egui;

use crate::state::{AppState, Page};
use crate::ui::{dashboard, home, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct GncvExplorerApp {
    pub state: AppState,
}

impl eframe::App for GncvExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: file menu + page navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dashboard facet filters ----
        if self.state.page == Page::Dashboard {
            egui::SidePanel::left("facet_panel")
                .default_width(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::facet_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: the selected page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => home::page(ui),
            Page::Map => map::page(ui, &mut self.state),
            Page::Dashboard => dashboard::page(ui, &mut self.state),
        });
    }
}
