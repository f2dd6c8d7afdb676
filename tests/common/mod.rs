// tests/common/mod.rs
#![allow(dead_code)]

use std::path::PathBuf;

use scraper::Html;
use tm_scrape::core::html;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("read fixture {name}: {e}"))
}

pub fn doc(name: &str) -> Html {
    html::parse(&fixture(name))
}

pub fn ymd(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
