// src/lib.rs
//! Fetch-and-parse scrapers for transfermarkt football statistics.
//!
//! Each page of the site has a spec under [`specs`]; a spec turns the page
//! into a [`DataSet`] that [`file`] writes out as CSV or TSV.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod data;
pub mod error;

pub mod csv;
pub mod file;
pub mod positions;
pub mod progress;
pub mod specs;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::{DataSet, Value};
pub use error::{Result, ScrapeError};
