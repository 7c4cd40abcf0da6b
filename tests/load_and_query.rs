use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use airport_explorer::data::cache::DEFAULT_CACHE_CAPACITY;
use airport_explorer::data::query::count_by_type;
use airport_explorer::data::summary::{count_by_region, top_n};
use airport_explorer::data::{
    load, AirportQuery, AirportType, DataError, ElevationBuckets, ElevationRange, QueryEngine,
    RegionSelector,
};

const AIRPORTS_CSV: &str = "\
id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,state
1,KBOS,large_airport,General Edward Lawrence Logan International Airport,42.3643,-71.0052,20,MA
2,KORH,medium_airport,Worcester Regional Airport,42.2673,-71.8757,1009,MA
3,KBDL,large_airport,Bradley International Airport,41.9389,-72.6832,173,CT
4,KLEB,medium_airport,Lebanon Municipal Airport,43.6261,-72.3042,603,NH
5,8B1,small_airport,Hawthorne-Feather Airpark,43.0612,-71.9089,700,NH
6,MA88,heliport,Boston City Hall Heliport,42.36,-71.06,,MA
7,KPVD,large_airport,Theodore Francis Green State Airport,41.7326,-71.4204,55,RI
8,VT01,small_airport,Mountain Strip,44.2,-72.6,n/a,VT
";

/// Write `contents` to a file unique to this test and return its path.
fn fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("airport-explorer-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_cleans_and_answers_queries() {
    let path = fixture("airports.csv", AIRPORTS_CSV);
    let dataset = load(&path).unwrap();

    // The heliport has no elevation and is dropped; "n/a" is coerced to 0.
    assert_eq!(dataset.len(), 7);
    let strip = dataset.iter().find(|r| r.name == "Mountain Strip").unwrap();
    assert_eq!(strip.elevation_ft, 0.0);

    let engine = QueryEngine::new(dataset, ElevationBuckets::standard(), DEFAULT_CACHE_CAPACITY);

    let query = AirportQuery::new(
        RegionSelector::One("MA".into()),
        ElevationRange::new(0.0, 2000.0).unwrap(),
        [AirportType::LargeAirport, AirportType::MediumAirport],
    );
    let (ma, count) = engine.filter(&query);
    assert_eq!(count, 2);
    let categories: Vec<_> = ma
        .iter()
        .map(|r| r.elevation_category.as_deref().unwrap())
        .collect();
    assert_eq!(categories, vec!["Low", "High"]);

    let summary = engine.summary();
    assert_eq!(summary.large_airports, 3);
    assert_eq!(
        count_by_region(engine.dataset()),
        vec![
            ("MA".to_string(), 2),
            ("NH".to_string(), 2),
            ("CT".to_string(), 1),
            ("RI".to_string(), 1),
            ("VT".to_string(), 1),
        ]
    );

    let highest = top_n(engine.dataset(), 2);
    let names: Vec<_> = highest.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Worcester Regional Airport", "Hawthorne-Feather Airpark"]
    );
}

#[test]
fn multi_region_query_and_type_counts() {
    let path = fixture("airports-multi.tsv", &AIRPORTS_CSV.replace(',', "\t"));
    let dataset = load(&path).unwrap();
    let engine = QueryEngine::new(dataset, ElevationBuckets::sea_level(), 0);

    let regions: BTreeSet<String> = ["NH", "CT", "RI"].into_iter().map(String::from).collect();
    let query = AirportQuery::new(
        RegionSelector::Any(regions),
        ElevationRange::new(0.0, 700.0).unwrap(),
        [
            AirportType::LargeAirport,
            AirportType::MediumAirport,
            AirportType::SmallAirport,
        ],
    );
    let (result, count) = engine.filter(&query);
    assert_eq!(count, 4);
    assert_eq!(
        count_by_type(&result),
        vec![
            (AirportType::LargeAirport, 2),
            (AirportType::MediumAirport, 1),
            (AirportType::SmallAirport, 1),
        ]
    );

    let table = engine.pivot(&result);
    assert_eq!(table.columns, vec!["Sea Level", "Low", "High"]);
    assert_eq!(table.get(&AirportType::LargeAirport, "Low"), 2);
    assert_eq!(table.get(&AirportType::LargeAirport, "High"), 0);
}

#[test]
fn unusable_inputs_are_reported() {
    let missing = std::env::temp_dir().join("airport-explorer-no-such-file.csv");
    assert!(matches!(
        load(&missing),
        Err(DataError::DataUnavailable { .. })
    ));

    let dir = std::env::temp_dir();
    assert!(matches!(load(&dir), Err(DataError::DataUnavailable { .. })));

    let headless = fixture("no-type.csv", "name,state,latitude_deg,longitude_deg,elevation_ft\n");
    assert!(matches!(
        load(&headless),
        Err(DataError::MissingColumn { column: "type" })
    ));
}
