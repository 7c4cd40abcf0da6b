use std::collections::HashMap;

use super::enrich::ElevationBuckets;
use super::model::{AirportRecord, AirportType, Dataset};
use super::query::{count_by, filter_by_type, sort_by_elevation_descending};

// ---------------------------------------------------------------------------
// Group counts
// ---------------------------------------------------------------------------

/// Airports per region, most common first; ties keep first-seen order.
/// Every row is counted exactly once.
pub fn count_by_region(dataset: &Dataset) -> Vec<(String, usize)> {
    count_by(dataset.iter().map(|r| r.region.clone()))
}

/// The `n` highest airports, highest first. Shorter than `n` only when the
/// dataset is.
pub fn top_n(dataset: &Dataset, n: usize) -> Vec<AirportRecord> {
    sort_by_elevation_descending(dataset, Some(n))
        .records()
        .to_vec()
}

/// Mean position as `(latitude, longitude)`.
pub fn centroid(dataset: &Dataset) -> Option<(f64, f64)> {
    if dataset.is_empty() {
        return None;
    }
    let n = dataset.len() as f64;
    let (lat, lon) = dataset
        .iter()
        .fold((0.0, 0.0), |(lat, lon), r| (lat + r.latitude, lon + r.longitude));
    Some((lat / n, lon / n))
}

/// The airport closest to (`lat`, `lon`), by plain squared degree distance.
/// Ties go to the earlier row.
pub fn nearest(dataset: &Dataset, lat: f64, lon: f64) -> Option<&AirportRecord> {
    let distance = |r: &AirportRecord| (r.latitude - lat).powi(2) + (r.longitude - lon).powi(2);
    dataset
        .iter()
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
}

// ---------------------------------------------------------------------------
// Pivot: type × elevation category
// ---------------------------------------------------------------------------

/// Count table with one row per airport type and one column per elevation
/// band. Combinations that never occur hold `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub rows: Vec<AirportType>,
    pub columns: Vec<String>,
    cells: Vec<Vec<usize>>,
}

impl PivotTable {
    pub fn get(&self, kind: &AirportType, category: &str) -> usize {
        let row = self.rows.iter().position(|k| k == kind);
        let col = self.columns.iter().position(|c| c == category);
        match (row, col) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0,
        }
    }

    /// Cells of one row, in column order.
    pub fn row(&self, kind: &AirportType) -> Option<&[usize]> {
        let row = self.rows.iter().position(|k| k == kind)?;
        Some(&self.cells[row])
    }

    pub fn row_total(&self, kind: &AirportType) -> usize {
        self.row(kind).map(|cells| cells.iter().sum()).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }
}

/// Cross-tabulate airport type against elevation band.
///
/// Rows follow first-seen type order and columns follow band order. A record
/// that was not enriched is placed using `buckets` directly.
pub fn pivot(dataset: &Dataset, buckets: &ElevationBuckets) -> PivotTable {
    let rows = dataset.types();
    let columns: Vec<String> = buckets.labels().map(str::to_string).collect();

    let row_index: HashMap<&AirportType, usize> =
        rows.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let col_index: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut cells = vec![vec![0usize; columns.len()]; rows.len()];
    for record in dataset {
        let category = record
            .elevation_category
            .as_deref()
            .unwrap_or_else(|| buckets.categorize(record.elevation_ft));
        let (Some(&r), Some(&c)) = (row_index.get(&record.kind), col_index.get(category)) else {
            log::warn!(
                "Airport '{}' has category '{category}' outside the current buckets",
                record.name
            );
            continue;
        };
        cells[r][c] += 1;
    }

    PivotTable {
        rows,
        columns,
        cells,
    }
}

// ---------------------------------------------------------------------------
// Whole-dataset summary
// ---------------------------------------------------------------------------

/// Figures shown beside the filtered view, always over the full dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total: usize,
    pub large_airports: usize,
    pub by_region: Vec<(String, usize)>,
}

impl DatasetSummary {
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            total: dataset.len(),
            large_airports: filter_by_type(dataset, &AirportType::LargeAirport).len(),
            by_region: count_by_region(dataset),
        }
    }
}
