use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use super::error::{DataError, Result};
use super::model::{AirportRecord, AirportType, Dataset};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Which region(s) a query keeps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionSelector {
    One(String),
    Any(BTreeSet<String>),
}

impl RegionSelector {
    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionSelector::One(code) => code == region,
            RegionSelector::Any(codes) => codes.contains(region),
        }
    }
}

/// Whether the viewer offers one region at a time or a set of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionMode {
    #[default]
    Single,
    Multi,
}

/// Inclusive elevation window in feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    min: f64,
    max: f64,
}

impl ElevationRange {
    /// Fails with [`DataError::InvalidRange`] when `min > max` or either bound
    /// is NaN.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(DataError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, elevation_ft: f64) -> bool {
        self.min <= elevation_ft && elevation_ft <= self.max
    }
}

/// One filter request: region, elevation window and allowed types.
///
/// An empty `types` set matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportQuery {
    pub region: RegionSelector,
    pub elevation: ElevationRange,
    pub types: BTreeSet<AirportType>,
}

impl AirportQuery {
    pub fn new(
        region: RegionSelector,
        elevation: ElevationRange,
        types: impl IntoIterator<Item = AirportType>,
    ) -> Self {
        Self {
            region,
            elevation,
            types: types.into_iter().collect(),
        }
    }

    pub fn matches(&self, record: &AirportRecord) -> bool {
        self.region.matches(&record.region)
            && self.elevation.contains(record.elevation_ft)
            && self.types.contains(&record.kind)
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Keep the rows matching `query`, in their original order, and return them
/// with their count. Zero matches is a normal outcome.
pub fn filter(dataset: &Dataset, query: &AirportQuery) -> (Dataset, usize) {
    let matched: Dataset = dataset
        .iter()
        .filter(|r| query.matches(r))
        .cloned()
        .collect();
    let count = matched.len();
    log::debug!("Query {query:?} matched {count} of {} airports", dataset.len());
    (matched, count)
}

/// All airports of a single type, in original order.
pub fn filter_by_type(dataset: &Dataset, kind: &AirportType) -> Dataset {
    dataset.iter().filter(|r| &r.kind == kind).cloned().collect()
}

/// Highest airports first; equal elevations keep their original order.
/// `limit` caps the number of rows returned.
pub fn sort_by_elevation_descending(dataset: &Dataset, limit: Option<usize>) -> Dataset {
    let mut rows: Vec<&AirportRecord> = dataset.iter().collect();
    // `sort_by` is stable, so ties stay in source order.
    rows.sort_by(|a, b| b.elevation_ft.total_cmp(&a.elevation_ft));
    rows.into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// Airports per type, most common first; ties keep first-seen order.
pub fn count_by_type(dataset: &Dataset) -> Vec<(AirportType, usize)> {
    count_by(dataset.iter().map(|r| r.kind.clone()))
}

/// Count occurrences, ordered by descending count with ties in first-seen
/// order.
pub(crate) fn count_by<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + std::hash::Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for key in keys {
        match slots.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        vec![
            AirportRecord::new("A", "MA", AirportType::SmallAirport, 42.0, -71.0, 100.0),
            AirportRecord::new("B", "MA", AirportType::LargeAirport, 42.3, -71.0, 600.0),
            AirportRecord::new("C", "CT", AirportType::SmallAirport, 41.5, -72.5, 50.0),
        ]
        .into_iter()
        .collect()
    }

    fn names(ds: &Dataset) -> Vec<&str> {
        ds.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn filters_by_region_range_and_type() {
        let query = AirportQuery::new(
            RegionSelector::One("MA".into()),
            ElevationRange::new(0.0, 1000.0).unwrap(),
            [AirportType::SmallAirport, AirportType::LargeAirport],
        );
        let (result, count) = filter(&sample(), &query);
        assert_eq!(names(&result), vec!["A", "B"]);
        assert_eq!(count, 2);
    }

    #[test]
    fn empty_type_set_matches_nothing() {
        let query = AirportQuery::new(
            RegionSelector::One("MA".into()),
            ElevationRange::new(0.0, 1000.0).unwrap(),
            BTreeSet::new(),
        );
        let (result, count) = filter(&sample(), &query);
        assert!(result.is_empty());
        assert_eq!(count, 0);
    }

    #[test]
    fn range_bounds_are_inclusive_and_validated() {
        let query = AirportQuery::new(
            RegionSelector::Any(["MA".to_string(), "CT".to_string()].into()),
            ElevationRange::new(50.0, 100.0).unwrap(),
            [AirportType::SmallAirport],
        );
        let (result, _) = filter(&sample(), &query);
        assert_eq!(names(&result), vec!["A", "C"]);

        assert!(matches!(
            ElevationRange::new(10.0, 5.0),
            Err(DataError::InvalidRange { min, max }) if min == 10.0 && max == 5.0
        ));
        assert!(ElevationRange::new(f64::NAN, 5.0).is_err());
        assert!(ElevationRange::new(5.0, 5.0).is_ok());
    }

    #[test]
    fn sort_is_stable_and_respects_limit() {
        let ds: Dataset = vec![
            AirportRecord::new("low", "VT", AirportType::Heliport, 44.0, -72.0, 10.0),
            AirportRecord::new("tie1", "VT", AirportType::Heliport, 44.0, -72.0, 900.0),
            AirportRecord::new("tie2", "VT", AirportType::Heliport, 44.0, -72.0, 900.0),
            AirportRecord::new("top", "VT", AirportType::Heliport, 44.0, -72.0, 1500.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            names(&sort_by_elevation_descending(&ds, None)),
            vec!["top", "tie1", "tie2", "low"]
        );
        assert_eq!(names(&sort_by_elevation_descending(&ds, Some(2))), vec!["top", "tie1"]);
    }

    #[test]
    fn type_counts_break_ties_by_first_seen() {
        let ds: Dataset = vec![
            AirportRecord::new("h", "NH", AirportType::Heliport, 0.0, 0.0, 0.0),
            AirportRecord::new("s1", "NH", AirportType::SmallAirport, 0.0, 0.0, 0.0),
            AirportRecord::new("l", "NH", AirportType::LargeAirport, 0.0, 0.0, 0.0),
            AirportRecord::new("s2", "NH", AirportType::SmallAirport, 0.0, 0.0, 0.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            count_by_type(&ds),
            vec![
                (AirportType::SmallAirport, 2),
                (AirportType::Heliport, 1),
                (AirportType::LargeAirport, 1),
            ]
        );
    }

    #[test]
    fn filter_by_type_selects_one_kind() {
        let large = filter_by_type(&sample(), &AirportType::LargeAirport);
        assert_eq!(names(&large), vec!["B"]);
    }
}
