// src/specs/league_table.rs
//
// League standings, final or after one gameweek. Both pages render the same
// table: #, crest, club, played, W, D, L, goals, goal difference, points.
// The crest cell (`td.no-border-rechts`) links to the club start page.

use scraper::{ElementRef, Html};

use crate::config::Domain;
use crate::core::html::{self, attr, cells, href_segment, rows, text};
use crate::core::net::Fetch;
use crate::core::sanitize::{int_or_null, rank, score};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};

use super::page;

pub const COLUMNS: [&str; 13] = [
    "Rank", "Club", "Played", "Wins", "Draw", "Losses", "Goals", "GD", "Pts", "GF", "GA",
    "club_name", "club_id",
];

const ROW_WIDTH: usize = 10;

pub fn table_url(domain: Domain, abbrev: &str, season: u16) -> String {
    format!("{}/superligaen/tabelle/wettbewerb/{abbrev}/saison_id/{season}", domain.base_url())
}

pub fn gameweek_url(domain: Domain, abbrev: &str, season: u16, gameweek: u32) -> String {
    format!(
        "{}/league-name/spieltagtabelle/wettbewerb/{abbrev}?saison_id={season}&spieltag={gameweek}",
        domain.base_url()
    )
}

/// The standings tbody: first table whose rows have the full width and a
/// crest cell. Match lists on the same page are narrower.
fn standings(doc: &Html) -> Result<ElementRef<'_>> {
    for tbody in html::select_all(doc, "table > tbody")? {
        let body_rows = rows(tbody);
        let Some(first) = body_rows.first() else { continue };
        if cells(*first).len() >= ROW_WIDTH && html::first_in(*first, "td.no-border-rechts")?.is_some() {
            return Ok(tbody);
        }
    }
    Err(ScrapeError::layout("no standings table"))
}

fn int(s: &str, what: &'static str) -> Result<i64> {
    int_or_null(s).ok_or_else(|| ScrapeError::parse(what, s))
}

pub fn parse_table(doc: &Html) -> Result<DataSet> {
    let tbody = standings(doc)?;
    let mut ds = DataSet::empty(&COLUMNS);

    for tr in rows(tbody) {
        let tds = cells(tr);
        if tds.len() < ROW_WIDTH {
            continue;
        }
        let t: Vec<String> = tds.iter().map(|td| text(*td)).collect();
        let (gf, ga) = score(&t[7]).ok_or_else(|| ScrapeError::parse("Goals", t[7].as_str()))?;

        let href = html::first_in(tds[1], "a")?
            .or(html::first_in(tds[2], "a.vereinprofil_tooltip")?)
            .and_then(|a| attr(a, "href"))
            .unwrap_or("");

        ds.push_row(vec![
            rank(&t[0]).into(),
            Value::text(t[2].as_str()),
            Value::Int(int(&t[3], "Played")?),
            Value::Int(int(&t[4], "Wins")?),
            Value::Int(int(&t[5], "Draw")?),
            Value::Int(int(&t[6], "Losses")?),
            Value::text(t[7].as_str()),
            Value::Int(int(&t[8], "GD")?),
            Value::Int(int(&t[9], "Pts")?),
            Value::Int(gf),
            Value::Int(ga),
            href_segment(href, 1).map(|s| s!(s)).into(),
            href_segment(href, 4).and_then(|s| s.parse::<i64>().ok()).into(),
        ])?;
    }
    Ok(ds)
}

pub fn fetch_table(fetcher: &dyn Fetch, domain: Domain, abbrev: &str, season: u16) -> Result<DataSet> {
    let doc = page(fetcher, &table_url(domain, abbrev, season))?;
    parse_table(&doc)
}

pub fn fetch_gameweek_table(
    fetcher: &dyn Fetch,
    domain: Domain,
    abbrev: &str,
    season: u16,
    gameweek: u32,
) -> Result<DataSet> {
    let doc = page(fetcher, &gameweek_url(domain, abbrev, season, gameweek))?;
    parse_table(&doc)
}
