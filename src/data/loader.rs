use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::model::{DatasetVariant, FuelRecord, PriceDataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Terminal load failures. Cell-level parse problems never surface here;
/// they become null fields on the record instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("opening {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("reading CSV row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Raw row – the source file's own schema
// ---------------------------------------------------------------------------

/// One row as it appears in the open-data export, before any coercion.
/// Every field is optional text; typing happens in [`FuelRecord::from`].
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "FECHA_PRECIO")]
    report_date: Option<String>,
    #[serde(rename = "PRECIO_PROMEDIO_PUBLICADO")]
    price: Option<String>,
    #[serde(rename = "CODIGO_MUNICIPIO_DANE")]
    municipality_code: Option<String>,
    #[serde(rename = "MUNICIPIO_EDS")]
    municipality: Option<String>,
    #[serde(rename = "DEPARTAMENTO_EDS")]
    department: Option<String>,
    #[serde(rename = "TIPO_COMBUSTIBLE")]
    fuel_type: Option<String>,
    #[serde(rename = "LATITUD_MUNICIPIO")]
    latitude: Option<String>,
    #[serde(rename = "LONGITUD_MUNICIPIO")]
    longitude: Option<String>,
    #[serde(rename = "ANIO_PRECIO")]
    year: Option<String>,
    #[serde(rename = "MES_PRECIO")]
    month: Option<String>,
}

impl From<RawRow> for FuelRecord {
    fn from(raw: RawRow) -> Self {
        FuelRecord {
            report_date: parse_date_soft(raw.report_date.as_deref()),
            price: parse_f64_soft(raw.price.as_deref()),
            municipality_code: clean_string(raw.municipality_code),
            municipality: clean_string(raw.municipality),
            department: clean_string(raw.department),
            fuel_type: clean_string(raw.fuel_type),
            latitude: parse_f64_soft(raw.latitude.as_deref()),
            longitude: parse_f64_soft(raw.longitude.as_deref()),
            year: parse_i32_soft(raw.year.as_deref()),
            month: parse_u32_soft(raw.month.as_deref()),
        }
        .with_derived_facets()
    }
}

// ---------------------------------------------------------------------------
// Soft cell parsers
// ---------------------------------------------------------------------------

/// Parse a date cell, accepting the formats seen in the export
/// (`YYYY-MM-DD`, optionally with a time suffix, and `DD/MM/YYYY`).
/// Anything else becomes `None`.
pub fn parse_date_soft(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    // Timestamp exports look like "2025-01-31T00:00:00" or "2025-01-31 00:00:00".
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}

/// Parse a numeric cell, tolerating thousands separators and surrounding
/// whitespace. Returns `None` for anything that is not safely a number.
pub fn parse_f64_soft(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() || s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    s.replace(',', "").parse::<f64>().ok()
}

fn parse_i32_soft(s: Option<&str>) -> Option<i32> {
    let s = s?.trim();
    s.parse::<i32>().ok()
}

fn parse_u32_soft(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    s.parse::<u32>().ok()
}

fn clean_string(s: Option<String>) -> String {
    s.map(|v| v.trim().to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Reading and normalization
// ---------------------------------------------------------------------------

/// Read every row of the source file, coercing cells softly.
///
/// A missing file or structurally broken CSV is a terminal [`DataError`];
/// bad cells inside an otherwise well-formed row are not.
pub fn read_records(path: &Path) -> Result<Vec<FuelRecord>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.map_err(|source| DataError::Csv {
            row: row_no + 1,
            source,
        })?;
        records.push(FuelRecord::from(raw));
    }
    Ok(records)
}

/// Normalize raw records into a dataset for the given variant.
///
/// Steps, in order:
/// 1. Sort ascending by `report_date`; null dates sort first, so during
///    deduplication any real date wins over a null one.
/// 2. Map variant only: deduplicate by `municipality_code`, keeping the
///    last (latest-date) occurrence.
/// 3. Drop rows with null coordinates.
/// 4. Drop rows outside the Colombia bounding box.
/// 5. Dashboard variant only: drop rows with a null price.
pub fn normalize(mut records: Vec<FuelRecord>, variant: DatasetVariant) -> PriceDataset {
    records.sort_by_key(|r| r.report_date);

    if variant == DatasetVariant::Map {
        records = dedup_keep_last(records);
    }

    records.retain(|r| r.in_bounding_box());

    if variant == DatasetVariant::Dashboard {
        records.retain(|r| r.price.is_some());
    }

    PriceDataset::from_records(records, variant)
}

/// Keep the last occurrence per municipality code, preserving the
/// (date-sorted) order of the survivors.
fn dedup_keep_last(records: Vec<FuelRecord>) -> Vec<FuelRecord> {
    let mut last_index: HashMap<String, usize> = HashMap::new();
    for (i, rec) in records.iter().enumerate() {
        last_index.insert(rec.municipality_code.clone(), i);
    }
    records
        .into_iter()
        .enumerate()
        .filter(|(i, rec)| last_index.get(&rec.municipality_code) == Some(i))
        .map(|(_, rec)| rec)
        .collect()
}

// ---------------------------------------------------------------------------
// Process-lifetime cache
// ---------------------------------------------------------------------------

/// Both pipeline variants built from a single read of one source file.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub path: PathBuf,
    pub map: Arc<PriceDataset>,
    pub dashboard: Arc<PriceDataset>,
}

/// Lazily-initialized cache of the loaded dataset.
///
/// `load` re-reads the file only when the requested path differs from the
/// cached one; `invalidate` is the explicit reload hook (the next `load`
/// re-reads from disk). The datasets themselves are never mutated after
/// construction, so they are handed out as shared `Arc`s.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<LoadedData>,
}

impl DatasetCache {
    /// Load (or return the cached) datasets for `path`. Handles are cheap
    /// `Arc` clones of the shared read-only data.
    pub fn load(&mut self, path: &Path) -> Result<LoadedData, DataError> {
        if let Some(entry) = &self.entry {
            if entry.path == path {
                return Ok(entry.clone());
            }
        }
        let records = read_records(path)?;
        let loaded = LoadedData {
            path: path.to_path_buf(),
            map: Arc::new(normalize(records.clone(), DatasetVariant::Map)),
            dashboard: Arc::new(normalize(records, DatasetVariant::Dashboard)),
        };
        self.entry = Some(loaded.clone());
        Ok(loaded)
    }

    /// Drop the cached datasets so the next `load` re-reads the file.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn loaded(&self) -> Option<&LoadedData> {
        self.entry.as_ref()
    }
}
