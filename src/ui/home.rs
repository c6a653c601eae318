use eframe::egui::{self, Ui};

// ---------------------------------------------------------------------------
// Home page – dataset context
// ---------------------------------------------------------------------------

/// Render the static contextual page about the dataset.
pub fn page(ui: &mut Ui) {
    ui.heading("GNCV Price Explorer");
    ui.label(
        "Explore an interactive map and an analytic dashboard of vehicular \
         compressed natural gas (GNCV) prices across Colombia.",
    );
    ui.add_space(8.0);

    ui.strong("About the dataset");
    ui.label(
        "The dataset is a public registry of average GNCV prices reported \
         automatically by service stations in Colombia. \
         Source: Datos Abiertos Colombia.",
    );
    ui.add_space(4.0);

    egui::CollapsingHeader::new("What does the dataset contain?")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("• Average GNCV prices per department, municipality and station.");
            ui.label("• The report date of each price, enabling time-series analysis.");
            ui.label("• Municipality coordinates for geographic exploration.");
        });

    egui::CollapsingHeader::new("Who produces it and why?")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(
                "Published by the Colombian government through Datos Abiertos under \
                 the Mines and Energy sector, to give consumers transparency, foster \
                 competition and support regional price analysis.",
            );
        });

    egui::CollapsingHeader::new("Caveats")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("• Reports are automated; this reduces human error but can introduce lag.");
            ui.label("• Prices vary regionally with transport, distribution networks and taxes.");
            ui.label("• Rows with unparseable dates or prices are treated as missing, not errors.");
        });

    egui::CollapsingHeader::new("Possible uses")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("• Track GNCV price variation over time.");
            ui.label("• Compare prices between regions.");
            ui.label("• Help drivers decide where and when to refuel.");
        });

    ui.add_space(8.0);
    ui.label("Open the source CSV via File → Open…, then switch to the Map or Dashboard page.");
}
