// src/specs/mod.rs
//! # Page specs
//!
//! One module per site page. Each spec knows *where the table lives in the
//! HTML* and *how to turn its cells into typed columns*.
//!
//! ## Shape of a spec
//! - `parse_*(doc, ..)` is pure: HTML in, `DataSet` out. Testable offline
//!   against saved pages.
//! - `fetch_*(fetcher, ..)` builds the URL(s), pulls the page(s) through a
//!   [`Fetch`] and hands them to the parser.
//! - Every spec documents its column list as a `COLUMNS` constant, so empty
//!   results still carry the right headers.
//!
//! ## Failure policy
//! Transport and HTTP status errors always reach the caller. A page that does
//! not look as expected is a `Layout`/`Parse` error; the player-history specs
//! (transfers, injuries, market value, player performance, national team)
//! turn those into an empty table and log a warning.
//!
//! ## What does **not** live here
//! - Writing files (`file.rs`), CSV rendering (`csv.rs`).
//! - Retry, caching, navigation between pages beyond a spec's own loop.

use scraper::Html;

use crate::core::html;
use crate::core::net::Fetch;
use crate::data::DataSet;
use crate::error::Result;

pub mod clubs;
pub mod competitions;
pub mod fixtures;
pub mod injuries;
pub mod league_table;
pub mod market_value;
pub mod national_team;
pub mod placements;
pub mod player_stats;
pub mod squad;
pub mod transfers;

/// A club as the site addresses it: URL slug plus numeric id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Club {
    pub slug: String,
    pub id: u32,
}

impl Club {
    pub fn new(slug: &str, id: u32) -> Self {
        Self { slug: s!(slug), id }
    }

    /// Relative club home page, e.g. `/borussia-dortmund/startseite/verein/16`.
    pub fn href(&self) -> String {
        format!("/{}/startseite/verein/{}", self.slug, self.id)
    }
}

/// A player id with an optional URL slug. The site ignores the slug, so any
/// placeholder works when it is unknown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: u32,
    pub slug: Option<String>,
}

impl Player {
    pub fn new(id: u32) -> Self {
        Self { id, slug: None }
    }

    pub fn with_slug(mut self, slug: &str) -> Self {
        self.slug = Some(s!(slug));
        self
    }

    pub fn slug_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.slug.as_deref().unwrap_or(placeholder)
    }
}

/// Fetch and parse one page.
pub(crate) fn page(fetcher: &dyn Fetch, url: &str) -> Result<Html> {
    let body = fetcher.get_text(url)?;
    Ok(html::parse(&body))
}

/// Best-effort wrapper: a page that does not match becomes an empty table
/// with the documented columns.
pub(crate) fn or_empty(res: Result<DataSet>, columns: &[&str], what: &str) -> Result<DataSet> {
    match res {
        Err(e) if e.is_layout() => {
            logw!("{what}: {e}; returning empty table");
            Ok(DataSet::empty(columns))
        }
        other => other,
    }
}
