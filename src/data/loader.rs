use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::{DataError, Result};
use super::model::{AirportRecord, AirportType, Dataset};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean an airport table from a delimited file.
///
/// The delimiter is picked from the extension: `.tsv` / `.tab` are read as
/// tab-separated, everything else as comma-separated.
pub fn load(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| DataError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = load_from_reader(file, delimiter_for(path)).map_err(|e| match e {
        DataError::Csv(err) if err.is_io_error() => unavailable(path, err),
        other => other,
    })?;

    log::info!("Loaded {} airports from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse and clean airport rows from any reader.
///
/// Rows missing a required field are dropped, as are rows whose coordinates
/// do not parse. A non-numeric elevation is coerced to `0.0`. Rows the CSV
/// parser rejects (e.g. wrong field count) are skipped with a warning.
pub fn load_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::resolve(reader.headers()?)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    let mut coerced = 0usize;
    let mut malformed = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping malformed row {row_no}: {e}");
                malformed += 1;
                continue;
            }
        };

        match clean_row(&row, &columns) {
            Some((record, was_coerced)) => {
                coerced += usize::from(was_coerced);
                records.push(record);
            }
            None => dropped += 1,
        }
    }

    log::debug!(
        "Cleaning kept {} rows, dropped {dropped} incomplete, skipped {malformed} malformed, \
         coerced {coerced} elevations to 0",
        records.len()
    );

    Ok(Dataset::from_records(records))
}

fn unavailable(path: &Path, err: csv::Error) -> DataError {
    let source = match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        kind => std::io::Error::other(format!("{kind:?}")),
    };
    DataError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    }
}

fn delimiter_for(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    }
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

const NAME: &[&str] = &["name"];
const REGION: &[&str] = &["state", "region", "iso_region"];
const TYPE: &[&str] = &["type"];
const LATITUDE: &[&str] = &["latitude_deg", "latitude", "lat"];
const LONGITUDE: &[&str] = &["longitude_deg", "longitude", "lon"];
const ELEVATION: &[&str] = &["elevation_ft", "elevation"];
const ID: &[&str] = &["id", "ident"];

/// Column positions of the fields we read.
#[derive(Debug)]
struct Columns {
    name: usize,
    region: usize,
    kind: usize,
    latitude: usize,
    longitude: usize,
    elevation: usize,
    id: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            name: required(headers, NAME)?,
            region: required(headers, REGION)?,
            kind: required(headers, TYPE)?,
            latitude: required(headers, LATITUDE)?,
            longitude: required(headers, LONGITUDE)?,
            elevation: required(headers, ELEVATION)?,
            id: position(headers, ID),
        })
    }
}

/// First header matching any alias, case-insensitively.
fn position(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(alias)))
}

fn required(headers: &StringRecord, aliases: &[&'static str]) -> Result<usize> {
    position(headers, aliases).ok_or(DataError::MissingColumn { column: aliases[0] })
}

// ---------------------------------------------------------------------------
// Row cleaning
// ---------------------------------------------------------------------------

/// Returns the cleaned record and whether its elevation had to be coerced.
fn clean_row(row: &StringRecord, cols: &Columns) -> Option<(AirportRecord, bool)> {
    let field = |idx: usize| row.get(idx).map(str::trim).filter(|s| !s.is_empty());

    let name = field(cols.name)?;
    let region = normalize_region(field(cols.region)?);
    let kind = AirportType::from_label(field(cols.kind)?);
    let latitude = parse_finite(field(cols.latitude)?)?;
    let longitude = parse_finite(field(cols.longitude)?)?;

    let (elevation_ft, coerced) = match parse_finite(field(cols.elevation)?) {
        Some(v) => (v, false),
        None => (0.0, true),
    };

    if region.is_empty() {
        return None;
    }

    let mut record = AirportRecord::new(name, region, kind, latitude, longitude, elevation_ft);
    record.id = cols.id.and_then(field).map(str::to_string);
    Some((record, coerced))
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `US-MA` → `MA`; plain codes pass through.
fn normalize_region(raw: &str) -> &str {
    raw.rsplit('-').next().unwrap_or(raw).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Dataset> {
        load_from_reader(text.as_bytes(), b',')
    }

    #[test]
    fn drops_incomplete_rows_and_coerces_elevation() {
        let csv = "\
id,name,state,type,latitude_deg,longitude_deg,elevation_ft
1,Logan,MA,large_airport,42.36,-71.01,20
2,,MA,small_airport,42.0,-71.0,100
3,Bradley,CT,large_airport,41.94,-72.68,
4,Mystery Field,NH,small_airport,43.0,-71.5,unknown
5,Bad Coords,ME,heliport,north,-70.0,50
";
        let ds = parse(csv).unwrap();
        assert_eq!(ds.len(), 2);

        let logan = ds.get(0).unwrap();
        assert_eq!(logan.id.as_deref(), Some("1"));
        assert_eq!(logan.kind, AirportType::LargeAirport);
        assert_eq!(logan.elevation_ft, 20.0);

        let mystery = ds.get(1).unwrap();
        assert_eq!(mystery.name, "Mystery Field");
        assert_eq!(mystery.elevation_ft, 0.0);
        assert!(mystery.elevation_category.is_none());
    }

    #[test]
    fn accepts_column_aliases_and_iso_regions() {
        let csv = "\
ident,type,name,latitude,longitude,elevation,iso_region
KBOS,large_airport,Logan,42.36,-71.01,20,US-MA
";
        let ds = parse(csv).unwrap();
        let r = ds.get(0).unwrap();
        assert_eq!(r.region, "MA");
        assert_eq!(r.id.as_deref(), Some("KBOS"));
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "name,state,type,latitude_deg,longitude_deg\nA,MA,heliport,1,2\n";
        match parse(csv) {
            Err(DataError::MissingColumn { column }) => assert_eq!(column, "elevation_ft"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv = "\
name,state,type,latitude_deg,longitude_deg,elevation_ft
A,MA,heliport,42,-71,10
B,MA,heliport
C,RI,small_airport,41.7,-71.4,55
";
        let ds = parse(csv).unwrap();
        let names: Vec<_> = ds.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn tab_separated_files_are_detected_by_extension() {
        assert_eq!(delimiter_for(Path::new("airports.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("airports.TAB")), b'\t');
        assert_eq!(delimiter_for(Path::new("airports.csv")), b',');
        assert_eq!(delimiter_for(Path::new("airports")), b',');
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = load(Path::new("/definitely/not/here/airports.csv")).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }), "{err:?}");
    }
}
