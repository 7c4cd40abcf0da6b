use std::collections::HashSet;

use serde::Deserialize;

use super::error::{DataError, Result};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Elevation buckets
// ---------------------------------------------------------------------------

/// One labelled elevation band, in feet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
}

impl Bucket {
    pub fn new(lower: f64, upper: f64, label: impl Into<String>) -> Self {
        Self {
            lower,
            upper,
            label: label.into(),
        }
    }
}

/// A validated, contiguous list of elevation bands.
///
/// Bands are closed on the right, so a value sitting exactly on an interior
/// edge falls in the lower band. The first band also takes everything below
/// its `lower` bound and the last everything above its `upper` bound, which
/// makes every elevation fall in exactly one band.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Bucket>")]
pub struct ElevationBuckets {
    buckets: Vec<Bucket>,
}

impl ElevationBuckets {
    pub fn new(buckets: Vec<Bucket>) -> Result<Self> {
        if buckets.is_empty() {
            return Err(DataError::InvalidBuckets("no buckets given".into()));
        }

        let mut labels = HashSet::new();
        for b in &buckets {
            if !(b.lower < b.upper) {
                return Err(DataError::InvalidBuckets(format!(
                    "bucket '{}' has lower bound {} not below upper bound {}",
                    b.label, b.lower, b.upper
                )));
            }
            if b.label.trim().is_empty() {
                return Err(DataError::InvalidBuckets("empty bucket label".into()));
            }
            if !labels.insert(b.label.as_str()) {
                return Err(DataError::InvalidBuckets(format!(
                    "duplicate bucket label '{}'",
                    b.label
                )));
            }
        }

        for pair in buckets.windows(2) {
            if pair[0].upper != pair[1].lower {
                return Err(DataError::InvalidBuckets(format!(
                    "bucket '{}' ends at {} but '{}' starts at {}",
                    pair[0].label, pair[0].upper, pair[1].label, pair[1].lower
                )));
            }
        }

        Ok(Self { buckets })
    }

    /// Low / Medium / High split at 500 ft and 1000 ft.
    pub fn standard() -> Self {
        Self {
            buckets: vec![
                Bucket::new(0.0, 500.0, "Low"),
                Bucket::new(500.0, 1000.0, "Medium"),
                Bucket::new(1000.0, f64::INFINITY, "High"),
            ],
        }
    }

    /// Sea Level / Low / High split at 0 ft and 1000 ft.
    pub fn sea_level() -> Self {
        Self {
            buckets: vec![
                Bucket::new(f64::NEG_INFINITY, 0.0, "Sea Level"),
                Bucket::new(0.0, 1000.0, "Low"),
                Bucket::new(1000.0, f64::INFINITY, "High"),
            ],
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Labels in band order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets.iter().map(|b| b.label.as_str())
    }

    /// Label of the band containing `elevation_ft`.
    pub fn categorize(&self, elevation_ft: f64) -> &str {
        let last = self.buckets.len() - 1;
        self.buckets
            .iter()
            .enumerate()
            .find(|(i, b)| *i == last || elevation_ft <= b.upper)
            .map(|(_, b)| b.label.as_str())
            .unwrap_or_default()
    }
}

impl Default for ElevationBuckets {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Bucket>> for ElevationBuckets {
    type Error = DataError;

    fn try_from(buckets: Vec<Bucket>) -> Result<Self> {
        Self::new(buckets)
    }
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Return a copy of `dataset` with `elevation_category` filled in.
///
/// The label only depends on `elevation_ft`, so enriching twice gives the
/// same result as enriching once.
pub fn enrich(dataset: &Dataset, buckets: &ElevationBuckets) -> Dataset {
    dataset
        .iter()
        .map(|r| {
            let mut record = r.clone();
            record.elevation_category = Some(buckets.categorize(r.elevation_ft).to_string());
            record
        })
        .collect()
}
