//! Writes `new_england_airports.csv`, a deterministic sample airport table in
//! the layout the explorer reads.

use anyhow::{Context, Result};
use serde::Serialize;

const OUTPUT_PATH: &str = "new_england_airports.csv";

#[derive(Serialize)]
struct Row<'a> {
    id: String,
    name: String,
    state: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    latitude_deg: f64,
    longitude_deg: f64,
    /// Written as text so a few rows can carry unparseable values.
    elevation_ft: String,
}

/// Approximate centre and typical elevation spread of each state.
const STATES: &[(&str, f64, f64, f64)] = &[
    ("MA", 42.3, -71.8, 600.0),
    ("CT", 41.6, -72.7, 500.0),
    ("RI", 41.7, -71.5, 200.0),
    ("NH", 43.6, -71.6, 1400.0),
    ("VT", 44.1, -72.7, 1500.0),
    ("ME", 45.0, -69.2, 900.0),
];

const TYPES: &[(&str, &str, u64)] = &[
    ("small_airport", "Field", 50),
    ("heliport", "Heliport", 30),
    ("seaplane_base", "Seaplane Base", 8),
    ("closed", "Airstrip", 6),
    ("medium_airport", "Regional Airport", 4),
    ("large_airport", "International Airport", 2),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Pick a type label with the weights in `TYPES`.
    fn pick_type(&mut self) -> (&'static str, &'static str) {
        let total: u64 = TYPES.iter().map(|t| t.2).sum();
        let mut roll = self.next_u64() % total;
        for &(kind, suffix, weight) in TYPES {
            if roll < weight {
                return (kind, suffix);
            }
            roll -= weight;
        }
        (TYPES[0].0, TYPES[0].1)
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    let mut written = 0usize;
    for &(state, lat, lon, spread) in STATES {
        for n in 0..40 {
            let (kind, suffix) = rng.pick_type();
            let elevation = (rng.next_f64() * spread * 2.0).round();
            let elevation_ft = match n {
                // A couple of rows with text elevations exercise the coercion path.
                7 => "unknown".to_string(),
                _ => format!("{elevation}"),
            };

            writer
                .serialize(Row {
                    id: format!("{state}{n:03}"),
                    name: format!("{state} {suffix} {}", n + 1),
                    state,
                    kind,
                    latitude_deg: lat + (rng.next_f64() - 0.5) * 1.6,
                    longitude_deg: lon + (rng.next_f64() - 0.5) * 1.6,
                    elevation_ft,
                })
                .context("writing airport row")?;
            written += 1;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {written} airports to {OUTPUT_PATH}");
    Ok(())
}
