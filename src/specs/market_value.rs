// src/specs/market_value.rs
//
// Market value history of a player. The values are not in a table but in the
// inline chart script:
//   'series':[{'type':'area', ... 'data':[{'y':2000000,'verein':'FC Barcelona',
//   'age':17,'mw':'2,00 Mio. €','datum_mw':'03.12.2004', ...}, ...]}]
// Non-ASCII characters arrive as \xHH / \uHHHH escapes.

use regex::Regex;

use crate::config::Domain;
use crate::core::net::Fetch;
use crate::core::sanitize::{date_with, decode_escapes};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};

use super::{or_empty, Player};

pub const COLUMNS: [&str; 4] = ["Date", "Market Value", "Club", "Age"];

const SERIES: &str = r"(?s)series(.*?)\]\}";
const ENTRY_START: &str = r#"\{\s*['"]y['"]\s*:"#;

/// `'key':123`
fn number_key(key: &str) -> String {
    format!(r#"['"]{key}['"]\s*:\s*(\d+)"#)
}

/// `'key':'text'`, backslash escapes allowed inside the quotes.
fn string_key(key: &str) -> String {
    format!(r#"['"]{key}['"]\s*:\s*(?:'((?:\\.|[^'\\])*)'|"((?:\\.|[^"\\])*)")"#)
}

pub fn url(domain: Domain, player: &Player) -> String {
    format!("{}/{}/marktwertverlauf/spieler/{}", domain.base_url(), player.slug_or("player"), player.id)
}

fn regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ScrapeError::layout(format!("bad pattern: {e}")))
}

struct Keys {
    value: Regex,
    club: Regex,
    age: Regex,
    date: Regex,
}

impl Keys {
    fn new() -> Result<Self> {
        Ok(Self {
            value: regex(&number_key("y"))?,
            club: regex(&string_key("verein"))?,
            age: regex(&number_key("age"))?,
            date: regex(&string_key("datum_mw"))?,
        })
    }
}

fn number(re: &Regex, entry: &str) -> Option<i64> {
    re.captures(entry)?.get(1)?.as_str().parse().ok()
}

fn string(re: &Regex, entry: &str) -> Option<String> {
    let c = re.captures(entry)?;
    let m = c.get(1).or_else(|| c.get(2))?;
    Some(s!(decode_escapes(m.as_str()).trim()))
}

/// History points in chart order. A page without the chart is a layout error.
///
/// Each `{'y':..}` entry is read on its own; a missing club or age is Null,
/// a missing value or date is a parse error.
pub fn parse_history(page: &str, dayfirst: bool) -> Result<DataSet> {
    let series = regex(SERIES)?
        .captures(page)
        .and_then(|c| c.get(1))
        .ok_or_else(|| ScrapeError::layout("no market value chart"))?
        .as_str();

    let keys = Keys::new()?;
    let starts: Vec<usize> = regex(ENTRY_START)?.find_iter(series).map(|m| m.start()).collect();

    let mut ds = DataSet::empty(&COLUMNS);
    for (i, &from) in starts.iter().enumerate() {
        let to = starts.get(i + 1).copied().unwrap_or(series.len());
        let entry = &series[from..to];

        let value = number(&keys.value, entry).ok_or_else(|| ScrapeError::parse("market value", entry))?;
        let when = string(&keys.date, entry)
            .and_then(|d| date_with(&d, dayfirst))
            .ok_or_else(|| ScrapeError::parse("datum_mw", entry))?;

        ds.push_row(vec![
            Value::Date(when),
            Value::Int(value),
            string(&keys.club, entry).into(),
            number(&keys.age, entry).into(),
        ])?;
    }
    Ok(ds)
}

/// Empty table when the player has no chart.
pub fn fetch_history(fetcher: &dyn Fetch, domain: Domain, player: &Player) -> Result<DataSet> {
    let body = fetcher.get_text(&url(domain, player))?;
    or_empty(parse_history(&body, domain.dayfirst()), &COLUMNS, "market value history")
}
