use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// FuelRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A single GNCV price report (one row of the source CSV).
///
/// Date, price and coordinates are `Option` because the loader coerces
/// unparseable cells to null instead of failing; rows missing a field are
/// only dropped where the consuming view requires that field.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelRecord {
    /// Date the price was reported.
    pub report_date: Option<NaiveDate>,
    /// Published average price in COP.
    pub price: Option<f64>,
    /// DANE municipality key; deduplication key for the map view.
    pub municipality_code: String,
    pub municipality: String,
    pub department: String,
    pub fuel_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Faceting columns; derived from `report_date` when the source cells
    /// are unparseable.
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl FuelRecord {
    /// Fill missing year/month facets from the report date.
    pub fn with_derived_facets(mut self) -> Self {
        if let Some(date) = self.report_date {
            self.year = self.year.or(Some(date.year()));
            self.month = self.month.or(Some(date.month()));
        }
        self
    }

    /// Whether both coordinates are present and inside the Colombia
    /// bounding box.
    pub fn in_bounding_box(&self) -> bool {
        matches!(
            (self.latitude, self.longitude),
            (Some(lat), Some(lon))
                if (LAT_MIN..=LAT_MAX).contains(&lat) && (LON_MIN..=LON_MAX).contains(&lon)
        )
    }
}

/// Colombia bounding box used to drop misgeocoded rows.
pub const LAT_MIN: f64 = -5.0;
pub const LAT_MAX: f64 = 15.0;
pub const LON_MIN: f64 = -85.0;
pub const LON_MAX: f64 = -65.0;

// ---------------------------------------------------------------------------
// PriceDataset – the complete normalized dataset
// ---------------------------------------------------------------------------

/// Which validity profile the normalization pipeline applies.
///
/// Both variants share parsing, the null-coordinate drop and the bounding
/// box; they differ in deduplication and required fields:
/// * `Map` keeps at most one row per municipality (the latest report) and
///   tolerates a null price.
/// * `Dashboard` keeps the full report history but requires a non-null
///   price, since every aggregate is computed over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetVariant {
    Map,
    Dashboard,
}

/// A normalized, read-only dataset with precomputed facet value sets.
#[derive(Debug, Clone)]
pub struct PriceDataset {
    /// Normalized records, sorted ascending by report date.
    pub records: Vec<FuelRecord>,
    pub variant: DatasetVariant,
    /// Sorted unique values per facet, for building the filter widgets.
    pub years: BTreeSet<i32>,
    pub months: BTreeSet<u32>,
    pub departments: BTreeSet<String>,
}

impl PriceDataset {
    /// Build the facet indices from normalized records.
    pub fn from_records(records: Vec<FuelRecord>, variant: DatasetVariant) -> Self {
        let mut years = BTreeSet::new();
        let mut months = BTreeSet::new();
        let mut departments = BTreeSet::new();

        for rec in &records {
            if let Some(y) = rec.year {
                years.insert(y);
            }
            if let Some(m) = rec.month {
                months.insert(m);
            }
            if !rec.department.is_empty() {
                departments.insert(rec.department.clone());
            }
        }

        PriceDataset {
            records,
            variant,
            years,
            months,
            departments,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lat: Option<f64>, lon: Option<f64>) -> FuelRecord {
        FuelRecord {
            report_date: None,
            price: None,
            municipality_code: "05001".into(),
            municipality: "MEDELLIN".into(),
            department: "ANTIOQUIA".into(),
            fuel_type: "GNCV".into(),
            latitude: lat,
            longitude: lon,
            year: None,
            month: None,
        }
    }

    #[test]
    fn bounding_box_accepts_colombia() {
        assert!(record(Some(6.25), Some(-75.56)).in_bounding_box());
    }

    #[test]
    fn bounding_box_rejects_out_of_range_and_null() {
        assert!(!record(Some(40.0), Some(-75.56)).in_bounding_box());
        assert!(!record(Some(6.25), Some(10.0)).in_bounding_box());
        assert!(!record(None, Some(-75.56)).in_bounding_box());
        assert!(!record(Some(6.25), None).in_bounding_box());
    }

    #[test]
    fn facets_derived_from_date() {
        let mut rec = record(None, None);
        rec.report_date = NaiveDate::from_ymd_opt(2025, 3, 14);
        let rec = rec.with_derived_facets();
        assert_eq!(rec.year, Some(2025));
        assert_eq!(rec.month, Some(3));
    }
}
