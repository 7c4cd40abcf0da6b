//! Airport explorer: load, clean, enrich and query a table of airports.
//!
//! The [`data`] module is the query engine; the `airport-explorer` binary is a
//! thin egui viewer on top of it.

pub mod config;
pub mod data;
