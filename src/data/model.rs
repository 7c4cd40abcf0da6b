use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// AirportType – the `type` column
// ---------------------------------------------------------------------------

/// Facility type as found in airport extracts.
///
/// Unknown labels are kept verbatim in [`AirportType::Other`] so that nothing
/// read from the file is lost; ordering follows declaration order so the
/// well-known types sort before the rest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AirportType {
    SmallAirport,
    MediumAirport,
    LargeAirport,
    Heliport,
    SeaplaneBase,
    Balloonport,
    Closed,
    Other(String),
}

impl AirportType {
    /// Parse a raw label. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "small_airport" => AirportType::SmallAirport,
            "medium_airport" => AirportType::MediumAirport,
            "large_airport" => AirportType::LargeAirport,
            "heliport" => AirportType::Heliport,
            "seaplane_base" => AirportType::SeaplaneBase,
            "balloonport" => AirportType::Balloonport,
            "closed" => AirportType::Closed,
            _ => AirportType::Other(trimmed.to_string()),
        }
    }

    /// The label as written in the source file.
    pub fn as_label(&self) -> &str {
        match self {
            AirportType::SmallAirport => "small_airport",
            AirportType::MediumAirport => "medium_airport",
            AirportType::LargeAirport => "large_airport",
            AirportType::Heliport => "heliport",
            AirportType::SeaplaneBase => "seaplane_base",
            AirportType::Balloonport => "balloonport",
            AirportType::Closed => "closed",
            AirportType::Other(label) => label,
        }
    }
}

impl fmt::Display for AirportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl From<&str> for AirportType {
    fn from(label: &str) -> Self {
        AirportType::from_label(label)
    }
}

// ---------------------------------------------------------------------------
// AirportRecord – one cleaned row
// ---------------------------------------------------------------------------

/// A single airport (one row of the cleaned table).
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRecord {
    /// Source identifier, when the file carries one.
    pub id: Option<String>,
    pub name: String,
    /// Short state/region code, e.g. `MA`.
    pub region: String,
    pub kind: AirportType,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_ft: f64,
    /// Bucket label; `None` until the dataset has been enriched.
    pub elevation_category: Option<String>,
}

impl AirportRecord {
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        kind: AirportType,
        latitude: f64,
        longitude: f64,
        elevation_ft: f64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            region: region.into(),
            kind,
            latitude,
            longitude,
            elevation_ft,
            elevation_category: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – immutable table of records
// ---------------------------------------------------------------------------

/// An ordered, read-only table of airports.
///
/// Every query returns a fresh `Dataset`; nothing hands out mutable access to
/// the rows once the table is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<AirportRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<AirportRecord>) -> Self {
        Self { records }
    }

    /// Number of airports.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AirportRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AirportRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&AirportRecord> {
        self.records.get(index)
    }

    /// Distinct region codes in first-seen order.
    pub fn regions(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.region.as_str()))
            .map(|r| r.region.clone())
            .collect()
    }

    /// Distinct airport types in first-seen order.
    pub fn types(&self) -> Vec<AirportType> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(&r.kind))
            .map(|r| r.kind.clone())
            .collect()
    }

    /// Lowest and highest elevation, or `None` for an empty dataset.
    pub fn elevation_extent(&self) -> Option<(f64, f64)> {
        self.records.iter().fold(None, |acc, r| {
            let e = r.elevation_ft;
            Some(match acc {
                None => (e, e),
                Some((lo, hi)) => (f64::min(lo, e), f64::max(hi, e)),
            })
        })
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a AirportRecord;
    type IntoIter = std::slice::Iter<'a, AirportRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<AirportRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = AirportRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_labels_round_trip_and_keep_unknowns() {
        assert_eq!(AirportType::from_label(" Large_Airport "), AirportType::LargeAirport);
        assert_eq!(AirportType::LargeAirport.to_string(), "large_airport");

        let odd = AirportType::from_label("gliderport");
        assert_eq!(odd, AirportType::Other("gliderport".into()));
        assert_eq!(odd.as_label(), "gliderport");
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let ds: Dataset = vec![
            AirportRecord::new("A", "VT", AirportType::Heliport, 44.0, -72.0, 10.0),
            AirportRecord::new("B", "MA", AirportType::SmallAirport, 42.0, -71.0, 300.0),
            AirportRecord::new("C", "VT", AirportType::Heliport, 44.5, -72.5, -5.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(ds.regions(), vec!["VT".to_string(), "MA".to_string()]);
        assert_eq!(ds.types(), vec![AirportType::Heliport, AirportType::SmallAirport]);
        assert_eq!(ds.elevation_extent(), Some((-5.0, 300.0)));
        assert_eq!(Dataset::default().elevation_extent(), None);
    }
}
