// src/specs/injuries.rs
//
// Injury history of a player. Columns are the site's own header row
// (German: Saison, Verletzung, von, bis, Tage, Verpasste Spiele).

use scraper::Html;

use crate::config::Domain;
use crate::core::html::{self, table_columns, table_from_tbody};
use crate::core::net::Fetch;
use crate::core::sanitize::{count, date_with, days};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};

use super::{or_empty, page, Player};

/// Header row of the German page; used for empty results.
pub const COLUMNS: [&str; 6] = ["Saison", "Verletzung", "von", "bis", "Tage", "Verpasste Spiele"];

enum Kind {
    Text,
    Date,
    Days,
    Count,
}

fn kind(header: &str) -> Kind {
    match header.to_lowercase().as_str() {
        "von" | "from" | "bis" | "until" => Kind::Date,
        "tage" | "days" => Kind::Days,
        "verpasste spiele" | "games missed" => Kind::Count,
        _ => Kind::Text,
    }
}

pub fn url(domain: Domain, player: &Player) -> String {
    format!("{}/{}/verletzungen/spieler/{}", domain.base_url(), player.slug_or("player"), player.id)
}

pub fn parse_history(doc: &Html, dayfirst: bool) -> Result<DataSet> {
    let thead = html::nth(doc, "thead", 0)?;
    let tbody = html::nth(doc, "tbody", 0)?;
    let headers = table_columns(thead)?;
    let kinds: Vec<Kind> = headers.iter().map(|h| kind(h)).collect();

    let mut ds = DataSet::new(headers);
    for cells in table_from_tbody(tbody, true) {
        if cells.len() != ds.width() {
            return Err(ScrapeError::layout(format!(
                "injury row with {} cells under {} headers",
                cells.len(),
                ds.width()
            )));
        }
        let row = cells
            .iter()
            .zip(&kinds)
            .map(|(c, k)| match k {
                Kind::Text => Value::text_or_null(c.as_str()),
                Kind::Date => date_with(c, dayfirst).into(),
                Kind::Days => days(c).into(),
                Kind::Count => Value::Int(count(c)),
            })
            .collect();
        ds.push_row(row)?;
    }
    Ok(ds)
}

/// Empty table when the player has no injury record.
pub fn fetch_history(fetcher: &dyn Fetch, domain: Domain, player: &Player) -> Result<DataSet> {
    let doc = page(fetcher, &url(domain, player))?;
    or_empty(parse_history(&doc, domain.dayfirst()), &COLUMNS, "injury history")
}
