use std::collections::BTreeSet;

use super::model::PriceDataset;

// ---------------------------------------------------------------------------
// Facet selection: which years/months/departments are selected
// ---------------------------------------------------------------------------

/// The dashboard's filter state. Facets combine conjunctively, and an empty
/// set means "nothing selected", which yields an empty view. Selecting zero
/// facet values must show zero rows, not all rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    pub years: BTreeSet<i32>,
    pub months: BTreeSet<u32>,
    pub departments: BTreeSet<String>,
}

impl FacetSelection {
    /// The initial selection for a freshly loaded dataset: every year and
    /// month, and CUNDINAMARCA as the department when present, otherwise
    /// the first department.
    pub fn initial(dataset: &PriceDataset) -> Self {
        let departments = if dataset.departments.contains("CUNDINAMARCA") {
            BTreeSet::from(["CUNDINAMARCA".to_string()])
        } else {
            dataset.departments.iter().take(1).cloned().collect()
        };
        FacetSelection {
            years: dataset.years.clone(),
            months: dataset.months.clone(),
            departments,
        }
    }
}

/// Return indices of records passing all three facet predicates.
///
/// A record passes when its year, month, and department are each in the
/// corresponding selected set; facet values that are null on the record
/// never match.
pub fn filtered_indices(dataset: &PriceDataset, selection: &FacetSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            rec.year.is_some_and(|y| selection.years.contains(&y))
                && rec.month.is_some_and(|m| selection.months.contains(&m))
                && selection.departments.contains(&rec.department)
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Map view selection
// ---------------------------------------------------------------------------

/// Department selector for the map page. `All` is the sentinel that skips
/// filtering entirely; the map is otherwise independent of the dashboard's
/// year/month facets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MapSelection {
    #[default]
    All,
    Department(String),
}

impl MapSelection {
    pub fn label(&self) -> &str {
        match self {
            MapSelection::All => "All departments",
            MapSelection::Department(name) => name,
        }
    }

    /// Whether a record's department matches this selection.
    pub fn matches(&self, department: &str) -> bool {
        match self {
            MapSelection::All => true,
            MapSelection::Department(name) => name == department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{DatasetVariant, FuelRecord};
    use chrono::NaiveDate;

    fn rec(dept: &str, year: i32, month: u32, price: f64) -> FuelRecord {
        FuelRecord {
            report_date: NaiveDate::from_ymd_opt(year, month, 1),
            price: Some(price),
            municipality_code: "05001".into(),
            municipality: "MEDELLIN".into(),
            department: dept.into(),
            fuel_type: "GNCV".into(),
            latitude: Some(6.25),
            longitude: Some(-75.56),
            year: Some(year),
            month: Some(month),
        }
    }

    fn dataset() -> PriceDataset {
        PriceDataset::from_records(
            vec![
                rec("ANTIOQUIA", 2024, 12, 3000.0),
                rec("ANTIOQUIA", 2025, 1, 3100.0),
                rec("ATLANTICO", 2025, 1, 2900.0),
                rec("CUNDINAMARCA", 2025, 2, 3300.0),
            ],
            DatasetVariant::Dashboard,
        )
    }

    #[test]
    fn facets_combine_conjunctively() {
        let ds = dataset();
        let sel = FacetSelection {
            years: BTreeSet::from([2025]),
            months: BTreeSet::from([1]),
            departments: BTreeSet::from(["ANTIOQUIA".to_string()]),
        };
        let idx = filtered_indices(&ds, &sel);
        assert_eq!(idx.len(), 1);
        assert_eq!(ds.records[idx[0]].price, Some(3100.0));
    }

    #[test]
    fn empty_facet_yields_empty_view_not_unfiltered() {
        let ds = dataset();
        let sel = FacetSelection {
            years: BTreeSet::new(),
            months: ds.months.clone(),
            departments: ds.departments.clone(),
        };
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn initial_selection_prefers_cundinamarca() {
        let ds = dataset();
        let sel = FacetSelection::initial(&ds);
        assert_eq!(sel.years, ds.years);
        assert_eq!(sel.months, ds.months);
        assert_eq!(sel.departments, BTreeSet::from(["CUNDINAMARCA".to_string()]));
    }

    #[test]
    fn initial_selection_falls_back_to_first_department() {
        let ds = PriceDataset::from_records(
            vec![rec("ATLANTICO", 2025, 1, 1.0), rec("ANTIOQUIA", 2025, 1, 2.0)],
            DatasetVariant::Dashboard,
        );
        let sel = FacetSelection::initial(&ds);
        assert_eq!(sel.departments, BTreeSet::from(["ANTIOQUIA".to_string()]));
    }

    #[test]
    fn map_selection_all_matches_everything() {
        assert!(MapSelection::All.matches("ANTIOQUIA"));
        let one = MapSelection::Department("ANTIOQUIA".into());
        assert!(one.matches("ANTIOQUIA"));
        assert!(!one.matches("ATLANTICO"));
    }
}
