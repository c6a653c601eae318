use std::path::Path;
use std::sync::Arc;

use crate::data::filter::{filtered_indices, FacetSelection, MapSelection};
use crate::data::loader::DatasetCache;
use crate::data::model::PriceDataset;

// ---------------------------------------------------------------------------
// Pages and tabs
// ---------------------------------------------------------------------------

/// The application's pages. Navigation state is this enum, not a widget
/// detail; the top bar sets it and the update loop dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Map,
    Dashboard,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Map, Page::Dashboard];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Map => "Map",
            Page::Dashboard => "Dashboard",
        }
    }
}

/// Which chart tab the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Trend,
    Regional,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Process-lifetime dataset cache (map + dashboard variants).
    pub cache: DatasetCache,

    /// Current page.
    pub page: Page,

    /// Map page: selected department (or all of them).
    pub map_selection: MapSelection,

    /// Dashboard page: facet selections.
    pub facets: FacetSelection,

    /// Dashboard rows passing the current facets (cached).
    pub visible_indices: Vec<usize>,

    /// Active dashboard chart tab.
    pub dashboard_tab: DashboardTab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: DatasetCache::default(),
            page: Page::default(),
            map_selection: MapSelection::default(),
            facets: FacetSelection::default(),
            visible_indices: Vec::new(),
            dashboard_tab: DashboardTab::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load (or reload) the source file and reset the view state to the
    /// defaults for the new dataset.
    pub fn open_file(&mut self, path: &Path) {
        match self.cache.load(path) {
            Ok(loaded) => {
                log::info!(
                    "loaded {}: {} map rows, {} dashboard rows",
                    loaded.path.display(),
                    loaded.map.len(),
                    loaded.dashboard.len()
                );
                self.facets = FacetSelection::initial(&loaded.dashboard);
                self.map_selection = MapSelection::All;
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Shared handle to the map-variant dataset, if loaded.
    pub fn map_dataset(&self) -> Option<Arc<PriceDataset>> {
        self.cache.loaded().map(|l| Arc::clone(&l.map))
    }

    /// Shared handle to the dashboard-variant dataset, if loaded.
    pub fn dashboard_dataset(&self) -> Option<Arc<PriceDataset>> {
        self.cache.loaded().map(|l| Arc::clone(&l.dashboard))
    }

    /// Recompute `visible_indices` after a facet change.
    pub fn refilter(&mut self) {
        self.visible_indices = match self.cache.loaded() {
            Some(loaded) => filtered_indices(&loaded.dashboard, &self.facets),
            None => Vec::new(),
        };
    }

    /// Select every value of the year facet.
    pub fn select_all_years(&mut self) {
        if let Some(ds) = self.dashboard_dataset() {
            self.facets.years = ds.years.clone();
            self.refilter();
        }
    }

    /// Select every value of the month facet.
    pub fn select_all_months(&mut self) {
        if let Some(ds) = self.dashboard_dataset() {
            self.facets.months = ds.months.clone();
            self.refilter();
        }
    }

    /// Select every department.
    pub fn select_all_departments(&mut self) {
        if let Some(ds) = self.dashboard_dataset() {
            self.facets.departments = ds.departments.clone();
            self.refilter();
        }
    }

    pub fn clear_years(&mut self) {
        self.facets.years.clear();
        self.refilter();
    }

    pub fn clear_months(&mut self) {
        self.facets.months.clear();
        self.refilter();
    }

    pub fn clear_departments(&mut self) {
        self.facets.departments.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_csv(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "gncv_explorer_state_{name}_{}.csv",
            std::process::id()
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "FECHA_PRECIO,PRECIO_PROMEDIO_PUBLICADO,CODIGO_MUNICIPIO_DANE,MUNICIPIO_EDS,DEPARTAMENTO_EDS,TIPO_COMBUSTIBLE,LATITUD_MUNICIPIO,LONGITUD_MUNICIPIO,ANIO_PRECIO,MES_PRECIO"
        )
        .unwrap();
        writeln!(f, "2025-01-31,3245.4,11001,BOGOTA,CUNDINAMARCA,GNCV,4.60,-74.08,2025,1").unwrap();
        writeln!(f, "2025-02-28,2900.0,08001,BARRANQUILLA,ATLANTICO,GNCV,10.96,-74.80,2025,2").unwrap();
        path
    }

    #[test]
    fn open_file_initializes_facets_and_view() {
        let path = sample_csv("init");
        let mut state = AppState::default();
        state.open_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(state.status_message.is_none());
        // Default department is CUNDINAMARCA, so only the Bogotá row is visible.
        assert_eq!(state.visible_indices.len(), 1);
        assert_eq!(state.facets.years.len(), 1);
        assert_eq!(state.facets.months.len(), 2);
    }

    #[test]
    fn clearing_a_facet_empties_the_view() {
        let path = sample_csv("clear");
        let mut state = AppState::default();
        state.open_file(&path);
        std::fs::remove_file(&path).ok();

        state.select_all_departments();
        assert_eq!(state.visible_indices.len(), 2);
        state.clear_months();
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn open_missing_file_sets_status_message() {
        let mut state = AppState::default();
        state.open_file(Path::new("/nonexistent/precios.csv"));
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error:"));
        assert!(state.cache.loaded().is_none());
    }
}
