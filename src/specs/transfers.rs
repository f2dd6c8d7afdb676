// src/specs/transfers.rs
//
// Transfer history of a player. Every transfer row has 13 direct cells:
//   0 season, 1 date, 2..=5 old club (crest, flag, spacer, name),
//   6..=9 new club (same), 10 market value, 11 fee, 12 link.
// Narrower rows (footer totals, notes) are not transfers.

use scraper::{ElementRef, Html};

use crate::config::Domain;
use crate::core::html::{self, attr, cells, has_class, href_segment, rows, text};
use crate::core::net::Fetch;
use crate::core::sanitize::{date_with, market_value, transfer_fee};
use crate::data::{DataSet, Value};
use crate::error::Result;

use super::{or_empty, page, Player};

pub const COLUMNS: [&str; 13] = [
    "Season", "Date", "Old_Club", "New_Club", "MV", "Transferfee", "Leihende", "Leihe",
    "fee_unknown", "old_club_string", "old_club_id", "new_club_string", "new_club_id",
];

const ROW_WIDTH: usize = 13;

/// Pseudo clubs link to a start page like real ones but carry no tooltip class.
const NO_CLUB_TITLES: [&str; 4] = ["Karriereende", "Vereinslos", "Unbekannt", "pausiert"];

pub fn url(domain: Domain, player: &Player) -> String {
    format!("{}/{}/transfers/spieler/{}", domain.base_url(), player.slug_or("player"), player.id)
}

fn is_club_link(a: ElementRef<'_>) -> bool {
    has_class(a, "vereinprofil_tooltip")
        || attr(a, "title").is_some_and(|t| NO_CLUB_TITLES.iter().any(|n| t.contains(n)))
}

/// (slug, id) of the first club link within `tds`.
fn club_ref(tds: &[ElementRef<'_>]) -> Result<(Value, Value)> {
    for td in tds {
        for a in html::select_in(*td, "a")? {
            if !is_club_link(a) {
                continue;
            }
            let href = attr(a, "href").unwrap_or("");
            let slug = href_segment(href, 1).map(|s| s!(s));
            let id = href_segment(href, 4).and_then(|s| s.parse::<i64>().ok());
            return Ok((slug.into(), id.into()));
        }
    }
    Ok((Value::Null, Value::Null))
}

pub fn parse_history(doc: &Html, dayfirst: bool) -> Result<DataSet> {
    let tbody = html::nth(doc, "tbody", 0)?;
    let mut ds = DataSet::empty(&COLUMNS);

    for tr in rows(tbody) {
        let tds = cells(tr);
        if tds.len() < ROW_WIDTH {
            continue;
        }
        let fee = transfer_fee(&text(tds[11]));
        let (old_slug, old_id) = club_ref(&tds[2..=5])?;
        let (new_slug, new_id) = club_ref(&tds[6..=9])?;

        ds.push_row(vec![
            Value::text(text(tds[0])),
            date_with(&text(tds[1]), dayfirst).into(),
            Value::text_or_null(text(tds[5])),
            Value::text_or_null(text(tds[9])),
            market_value(&text(tds[10])).into(),
            fee.amount.into(),
            Value::Bool(fee.loan_end),
            Value::Bool(fee.loan),
            Value::Bool(fee.unknown),
            old_slug,
            old_id,
            new_slug,
            new_id,
        ])?;
    }
    Ok(ds)
}

/// Empty table when the page has no transfer table.
pub fn fetch_history(fetcher: &dyn Fetch, domain: Domain, player: &Player) -> Result<DataSet> {
    let doc = page(fetcher, &url(domain, player))?;
    or_empty(parse_history(&doc, domain.dayfirst()), &COLUMNS, "transfer history")
}
