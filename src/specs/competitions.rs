// src/specs/competitions.rs
//
// Competition overview per region (`/wettbewerbe/{region}`), walking the pager.
//
// The single tbody interleaves group header rows (one cell: "Erste Liga",
// "Pokalwettbewerb", …) with competition rows. The header text becomes the
// `League_Type` of every competition row below it.

use scraper::Html;

use crate::config::{Region, ScrapeOptions};
use crate::core::html::{self, attr, cells, rows, text};
use crate::core::net::{pause, Fetch};
use crate::core::sanitize::{count, german_float, market_value};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};
use crate::progress::Progress;

use super::page;

pub const COLUMNS: [&str; 9] = [
    "League_Name", "n_clubs", "n_players", "avg_age", "pct_legionary",
    "Market_Value", "League_Type", "competition_string", "Country",
];

pub fn url(opts: &ScrapeOptions, region: Region) -> String {
    format!("{}/wettbewerbe/{}", opts.domain.base_url(), region)
}

/// Competition rows of one overview page.
pub fn parse_page(doc: &Html) -> Result<DataSet> {
    let tbody = html::nth(doc, "tbody", 0)?;
    let mut ds = DataSet::empty(&COLUMNS);
    let mut league_type = Value::Null;

    for tr in rows(tbody) {
        let tds = cells(tr);
        let first = match tds.first() {
            Some(td) => *td,
            None => continue,
        };
        let rest: Vec<String> = tds[1..].iter().map(|td| text(*td)).filter(|t| !t.is_empty()).collect();

        if rest.is_empty() {
            league_type = Value::text_or_null(text(first));
            continue;
        }
        if rest.len() < 5 {
            return Err(ScrapeError::layout(format!("competition row with {} value cells", rest.len())));
        }

        // Name and code from the competition link (the crest link has no text).
        let link = html::select_in(first, "a")?
            .into_iter()
            .filter(|a| attr(*a, "href").is_some_and(|h| h.contains("startseite/wettbewerb")))
            .find(|a| !text(*a).is_empty());
        let (name, code) = match link {
            Some(a) => (text(a), attr(a, "href").and_then(html::last_segment).map(|s| s!(s))),
            None => (text(first), None),
        };

        let country = html::first_in(tr, "img.flaggenrahmen")?
            .and_then(|img| attr(img, "title"))
            .map(|s| s!(s));

        ds.push_row(vec![
            Value::text(name),
            Value::Int(count(&rest[0])),
            Value::Int(count(&rest[1])),
            german_float(&rest[2]).into(),
            german_float(&rest[3]).into(),
            market_value(&rest[4]).into(),
            league_type.clone(),
            code.into(),
            country.into(),
        ])?;
    }
    Ok(ds)
}

/// Follow-up page URLs from `div.pager`: its last entry links to the last
/// page as `...=N`. No pager means a single page.
pub fn parse_pager(doc: &Html, base_url: &str) -> Result<Vec<String>> {
    let pager = match html::select_all(doc, "div.pager")?.into_iter().next() {
        Some(p) => p,
        None => return Ok(Vec::new()),
    };
    let last_li = match html::select_in(pager, "li")?.into_iter().last() {
        Some(li) => li,
        None => return Ok(Vec::new()),
    };
    let href = match html::first_in(last_li, "a")?.and_then(|a| attr(a, "href")) {
        Some(h) => h,
        None => return Ok(Vec::new()),
    };
    let Some((prefix, last)) = href.rsplit_once('=') else {
        return Ok(Vec::new());
    };
    let last: u32 = last.trim().parse().map_err(|_| ScrapeError::parse("pager link", href))?;

    Ok((2..=last).map(|n| format!("{base_url}{prefix}={n}")).collect())
}

/// All competitions of one region, across every pager page.
pub fn fetch(
    fetcher: &dyn Fetch,
    opts: &ScrapeOptions,
    region: Region,
    mut progress: Option<&mut dyn Progress>,
) -> Result<DataSet> {
    let first = page(fetcher, &url(opts, region))?;
    let mut all = parse_page(&first)?;
    let pages = parse_pager(&first, &opts.domain.base_url())?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(pages.len() + 1);
        p.item_done(1);
    }

    for (i, next) in pages.iter().enumerate() {
        pause(opts);
        let doc = page(fetcher, next)?;
        all.append(parse_page(&doc)?)?;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(i as u32 + 2);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!("{} competitions in {region}", all.len());
    Ok(all)
}
