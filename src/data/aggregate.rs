use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::filter::MapSelection;
use super::model::PriceDataset;
use crate::format::format_cop_opt;

// ---------------------------------------------------------------------------
// KPI summary
// ---------------------------------------------------------------------------

/// Mean/min/max over the filtered view's prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize prices over the given row indices. `None` when the view has no
/// priced rows, so callers render "no data" instead of a misleading zero.
pub fn price_summary(dataset: &PriceDataset, indices: &[usize]) -> Option<PriceSummary> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &i in indices {
        if let Some(price) = dataset.records[i].price {
            count += 1;
            sum += price;
            min = min.min(price);
            max = max.max(price);
        }
    }

    (count > 0).then(|| PriceSummary {
        mean: sum / count as f64,
        min,
        max,
    })
}

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

/// Mean price per report date, ascending by date. Rows with a null date are
/// skipped; they cannot be placed on the time axis.
pub fn time_series(dataset: &PriceDataset, indices: &[usize]) -> Vec<(NaiveDate, f64)> {
    let mut groups: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        if let (Some(date), Some(price)) = (rec.report_date, rec.price) {
            let entry = groups.entry(date).or_insert((0.0, 0));
            entry.0 += price;
            entry.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(date, (sum, n))| (date, sum / n as f64))
        .collect()
}

/// Mean price per department, sorted descending by mean price. The highest
/// price coming first is a display contract for the regional bar chart.
pub fn regional_comparison(dataset: &PriceDataset, indices: &[usize]) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        if let Some(price) = rec.price {
            let entry = groups.entry(rec.department.as_str()).or_insert((0.0, 0));
            entry.0 += price;
            entry.1 += 1;
        }
    }
    let mut rows: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(dept, (sum, n))| (dept.to_string(), sum / n as f64))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    rows
}

// ---------------------------------------------------------------------------
// Map rendering input
// ---------------------------------------------------------------------------

/// One marker on the station map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    /// Null when the municipality's latest report had no parseable price;
    /// the marker is still shown, just without a price color.
    pub price: Option<f64>,
    /// Hover label: municipality, department, fuel type and price.
    pub label: String,
}

/// Build the map markers from the map-variant dataset for the selected
/// department (or all of them).
pub fn map_points(dataset: &PriceDataset, selection: &MapSelection) -> Vec<MapPoint> {
    dataset
        .records
        .iter()
        .filter(|rec| selection.matches(&rec.department))
        .filter_map(|rec| {
            let (lat, lon) = (rec.latitude?, rec.longitude?);
            let label = format!(
                "Municipality: {}\nDepartment: {}\nFuel type: {}\nAvg. price: {}",
                rec.municipality,
                rec.department,
                rec.fuel_type,
                format_cop_opt(rec.price),
            );
            Some(MapPoint {
                lat,
                lon,
                price: rec.price,
                label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{DatasetVariant, FuelRecord};

    fn rec(dept: &str, date: &str, price: Option<f64>) -> FuelRecord {
        FuelRecord {
            report_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            price,
            municipality_code: "05001".into(),
            municipality: "MEDELLIN".into(),
            department: dept.into(),
            fuel_type: "GNCV".into(),
            latitude: Some(6.25),
            longitude: Some(-75.56),
            year: Some(2025),
            month: Some(1),
        }
    }

    fn dashboard(records: Vec<FuelRecord>) -> PriceDataset {
        PriceDataset::from_records(records, DatasetVariant::Dashboard)
    }

    fn all_indices(ds: &PriceDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn summary_over_empty_view_is_no_data() {
        let ds = dashboard(vec![]);
        assert_eq!(price_summary(&ds, &[]), None);
    }

    #[test]
    fn summary_mean_min_max() {
        let ds = dashboard(vec![
            rec("A", "2025-01-01", Some(100.0)),
            rec("A", "2025-01-02", Some(200.0)),
            rec("B", "2025-01-03", Some(50.0)),
        ]);
        let s = price_summary(&ds, &all_indices(&ds)).unwrap();
        assert_eq!(s.mean, 350.0 / 3.0);
        assert_eq!(s.min, 50.0);
        assert_eq!(s.max, 200.0);
    }

    #[test]
    fn time_series_groups_by_date_ascending() {
        let ds = dashboard(vec![
            rec("A", "2025-01-01", Some(10.0)),
            rec("A", "2025-01-01", Some(20.0)),
            rec("A", "2025-01-02", Some(5.0)),
        ]);
        let series = time_series(&ds, &all_indices(&ds));
        assert_eq!(
            series,
            vec![
                (NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 15.0),
                (NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), 5.0),
            ]
        );
    }

    #[test]
    fn regional_comparison_descending_by_mean() {
        let ds = dashboard(vec![
            rec("A", "2025-01-01", Some(100.0)),
            rec("A", "2025-01-02", Some(200.0)),
            rec("B", "2025-01-03", Some(50.0)),
        ]);
        let rows = regional_comparison(&ds, &all_indices(&ds));
        assert_eq!(
            rows,
            vec![("A".to_string(), 150.0), ("B".to_string(), 50.0)]
        );
    }

    #[test]
    fn map_points_filter_by_department_and_format_label() {
        let map_ds = PriceDataset::from_records(
            vec![
                rec("ANTIOQUIA", "2025-01-01", Some(3245.4)),
                rec("ATLANTICO", "2025-01-01", Some(2900.0)),
            ],
            DatasetVariant::Map,
        );

        let all = map_points(&map_ds, &MapSelection::All);
        assert_eq!(all.len(), 2);

        let one = map_points(&map_ds, &MapSelection::Department("ANTIOQUIA".into()));
        assert_eq!(one.len(), 1);
        assert!(one[0].label.contains("Municipality: MEDELLIN"));
        assert!(one[0].label.contains("Avg. price: $3,245"));
    }

    #[test]
    fn map_points_keep_unpriced_markers() {
        let map_ds = PriceDataset::from_records(
            vec![rec("ANTIOQUIA", "2025-01-01", None)],
            DatasetVariant::Map,
        );
        let pts = map_points(&map_ds, &MapSelection::All);
        assert_eq!(pts.len(), 1);
        assert_eq!(pts[0].price, None);
        assert!(pts[0].label.contains("Avg. price: no data"));
    }
}
