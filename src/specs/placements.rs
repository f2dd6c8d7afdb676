// src/specs/placements.rs
//
// Historic league placements of a club ("Historische Platzierungen"):
// the final table per season, or the table after one gameweek per season.

use chrono::Datelike;
use scraper::{ElementRef, Html};

use crate::config::{Domain, ScrapeOptions};
use crate::core::html::{self, attr, cells, rows, text};
use crate::core::net::{pause, Fetch};
use crate::core::sanitize::{count, int_or_null, score, season_year, title_case_slug};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};
use crate::progress::Progress;

use super::{page, Club};

pub const LEAGUE_COLUMNS: [&str; 16] = [
    "Saison", "Liga", "Ligahöhe", "W", "D", "L", "Tore", "GD", "Punkte", "Platz", "Trainer",
    "GF", "GA", "Pts", "Games Played", "Liga Image Links",
];

pub const GAMEWEEK_COLUMNS: [&str; 18] = [
    "Saison", "Liga", "Ligahöhe", "W", "D", "L", "GF", "GA", "GD", "Punkte", "Platz", "Trainer",
    "img_link", "club", "club_href", "club_id", "Spieltag", "Jahr",
];

pub fn league_url(domain: Domain, club: &Club) -> String {
    format!("{}/{}/platzierungen/verein/{}", domain.base_url(), club.slug, club.id)
}

pub fn gameweek_url(domain: Domain, club: &Club, gameweek: u32) -> String {
    format!("{}/spieltag/{gameweek}", league_url(domain, club))
}

/// League crest of a row, in the bigger size.
fn league_image(tr: ElementRef<'_>) -> Result<Option<String>> {
    let img = html::select_in(tr, "img")?
        .into_iter()
        .find(|img| attr(*img, "class").is_none_or(|c| c.trim().is_empty()));
    Ok(img.and_then(|i| attr(i, "src")).map(|src| src.replace("verysmall", "medium")))
}

fn int(s: &str, what: &'static str) -> Result<i64> {
    int_or_null(s).ok_or_else(|| ScrapeError::parse(what, s))
}

/// Final placements, one row per season. The placements table is the page's
/// second tbody.
pub fn parse_league_placements(doc: &Html) -> Result<DataSet> {
    let tbody = html::nth(doc, "tbody", 1)?;
    let mut ds = DataSet::empty(&LEAGUE_COLUMNS);

    for tr in rows(tbody) {
        let vals: Vec<String> = cells(tr).into_iter().map(text).filter(|t| !t.is_empty()).collect();
        if vals.len() < 11 {
            return Err(ScrapeError::layout(format!("placement row with {} cells", vals.len())));
        }
        let (w, d, l) = (int(&vals[3], "W")?, int(&vals[4], "D")?, int(&vals[5], "L")?);
        let (gf, ga) = score(&vals[6]).ok_or_else(|| ScrapeError::parse("Tore", vals[6].as_str()))?;

        ds.push_row(vec![
            Value::text(vals[0].as_str()),
            Value::text(vals[1].as_str()),
            Value::text(vals[2].as_str()),
            Value::Int(w),
            Value::Int(d),
            Value::Int(l),
            Value::text(vals[6].as_str()),
            Value::Int(int(&vals[7], "GD")?),
            Value::text(vals[8].as_str()),
            Value::Int(int(&vals[9], "Platz")?),
            Value::text(vals[10].as_str()),
            Value::Int(gf),
            Value::Int(ga),
            Value::Int(w * 3 + d),
            Value::Int(w + d + l),
            league_image(tr)?.into(),
        ])?;
    }
    Ok(ds)
}

pub fn fetch_league_placements(fetcher: &dyn Fetch, domain: Domain, club: &Club) -> Result<DataSet> {
    let doc = page(fetcher, &league_url(domain, club))?;
    parse_league_placements(&doc)
}

/// Placements after `gameweek`, one row per season.
///
/// Cell layout: Saison, crest, Liga, Ligahöhe, W, D, L, Tore, GD, Punkte,
/// Platz, Trainer. Points keep the part before ':' (two-point era pages show
/// "40:28"). `current_yy` pivots two-digit seasons into centuries.
pub fn parse_gameweek_placements(doc: &Html, club: &Club, gameweek: u32, current_yy: i64) -> Result<DataSet> {
    let tbody = html::nth(doc, "tbody", 1)?;
    let mut ds = DataSet::empty(&GAMEWEEK_COLUMNS);
    let club_name = title_case_slug(&club.slug);

    for tr in rows(tbody) {
        let tds: Vec<String> = cells(tr).into_iter().map(text).collect();
        if tds.len() < 12 {
            return Err(ScrapeError::layout(format!("gameweek row with {} cells", tds.len())));
        }
        let (gf, ga) = score(&tds[7]).ok_or_else(|| ScrapeError::parse("Tore", tds[7].as_str()))?;
        let points = tds[9].split(':').next().unwrap_or("");
        let img = html::first_in(tr, "img")?
            .and_then(|i| attr(i, "src"))
            .map(|src| src.replace("verysmall", "medium"));

        ds.push_row(vec![
            Value::text(tds[0].as_str()),
            Value::text(tds[2].as_str()),
            Value::text(tds[3].as_str()),
            Value::Int(int(&tds[4], "W")?),
            Value::Int(int(&tds[5], "D")?),
            Value::Int(int(&tds[6], "L")?),
            Value::Int(gf),
            Value::Int(ga),
            Value::Int(int(&tds[8], "GD")?),
            Value::Int(count(points)),
            Value::Int(int(&tds[10], "Platz")?),
            Value::text(tds[11].as_str()),
            img.into(),
            Value::text(club_name.as_str()),
            Value::text(club.href()),
            Value::Int(club.id as i64),
            Value::Int(gameweek as i64),
            season_year(&tds[0], current_yy).into(),
        ])?;
    }
    Ok(ds)
}

/// Gameweeks 1..=max_gameweeks, pausing between requests. A gameweek page
/// that does not parse (league has fewer gameweeks) is skipped.
pub fn fetch_gameweek_placements(
    fetcher: &dyn Fetch,
    opts: &ScrapeOptions,
    club: &Club,
    mut progress: Option<&mut dyn Progress>,
) -> Result<DataSet> {
    let current_yy = (chrono::Local::now().year() % 100) as i64;
    let mut all = DataSet::empty(&GAMEWEEK_COLUMNS);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(opts.max_gameweeks as usize);
    }

    for gw in 1..=opts.max_gameweeks {
        if gw > 1 {
            pause(opts);
        }
        let doc = page(fetcher, &gameweek_url(opts.domain, club, gw))?;
        match parse_gameweek_placements(&doc, club, gw, current_yy) {
            Ok(ds) => {
                all.append(ds)?;
                if let Some(p) = progress.as_deref_mut() { p.item_done(gw); }
            }
            Err(e) if e.is_layout() => {
                logw!("{} gameweek {gw}: {e}", club.slug);
                if let Some(p) = progress.as_deref_mut() { p.item_failed(gw, &e.to_string()); }
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(all)
}
