// src/specs/squad.rs
//
// Squad pages of one club and season:
// - roster ("Kader", detailed view): contract and personal data
// - performance ("Leistungsdaten", detailed view): appearances, goals, minutes
//
// Both list one player per direct row of the first `div.responsive-table`
// tbody. The player cell holds an inline table: name link on top, position
// in its last row. Only direct cells are read, so that inline table never
// shifts the columns.

use chrono::NaiveDate;
use scraper::{ElementRef, Html};

use crate::config::Domain;
use crate::core::html::{self, attr, cells, href_segment, rows, text};
use crate::core::net::Fetch;
use crate::core::sanitize::{
    count, date, german_float, in_parens, int_or_null, last_word, market_value,
};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};

use super::{page, Club};

pub const ROSTER_COLUMNS: [&str; 15] = [
    "Shirt Number", "Name", "Last Name", "Position", "Date of Birth", "Height", "Footedness",
    "At Club Since", "Contract Expires", "Market Value", "Image Link", "player_id",
    "player_string", "Age", "Days at Club",
];

pub const PERFORMANCE_COLUMNS: [&str; 20] = [
    "Shirt Number", "Name", "Last Name", "Position", "Age", "In Squad", "Games Played", "Goals",
    "Assists", "Yellow", "Second Yellow", "Red", "Substituted On", "Substituted Off", "PPM",
    "Minutes Played", "player_id", "player_string", "Scorer", "Minutes per Appearance",
];

pub fn roster_url(domain: Domain, club: &Club, season: u16) -> String {
    format!(
        "{}/{}/kader/verein/{}/saison_id/{season}/plus/1",
        domain.base_url(), club.slug, club.id
    )
}

/// With a league code only that competition counts, otherwise all of them.
pub fn performance_url(domain: Domain, club: &Club, season: u16, league: Option<&str>) -> String {
    let base = domain.base_url();
    match league {
        Some(l) => format!("{base}/{}/leistungsdaten/verein/{}/plus/1?reldata={l}%26{season}", club.slug, club.id),
        None => format!("{base}/{}/leistungsdaten/verein/{}/reldata/%26{season}/plus/1", club.slug, club.id),
    }
}

/// What the inline player cell yields.
#[derive(Debug, Default)]
struct PlayerCell {
    name: String,
    position: String,
    id: Option<String>,
    slug: Option<String>,
    image: Option<String>,
}

fn player_cell(td: ElementRef<'_>) -> Result<PlayerCell> {
    let mut out = PlayerCell::default();

    if let Some(a) = html::first_in(td, "a.spielprofil_tooltip")? {
        out.name = text(a);
        let href = attr(a, "href").unwrap_or("");
        out.id = attr(a, "id").map(|s| s!(s)).or_else(|| href_segment(href, 4).map(|s| s!(s)));
        out.slug = href_segment(href, 1).map(|s| s!(s));
    }
    if let Some(last_tr) = html::select_in(td, "tr")?.into_iter().last() {
        out.position = text(last_tr);
    }
    if out.name.is_empty() {
        return Err(ScrapeError::layout("player cell without profile link"));
    }
    out.image = html::first_in(td, "img.bilderrahmen-fixed")?
        .and_then(|img| attr(img, "data-src").or_else(|| attr(img, "src")))
        .map(|src| src.replace("small", "big"));
    Ok(out)
}

fn squad_tbody(doc: &Html) -> Result<ElementRef<'_>> {
    let table = html::nth(doc, "div.responsive-table", 0)?;
    html::first_in(table, "tbody")?.ok_or_else(|| ScrapeError::layout("responsive-table without tbody"))
}

fn id_value(id: Option<String>) -> Value {
    id.and_then(|s| s.parse::<i64>().ok()).into()
}

/// Roster with "Days at Club" counted up to `today`.
///
/// Cell layout: #, player, birth date (age), nationality, height, foot,
/// joined, previous club, contract until, market value.
pub fn parse_roster_at(doc: &Html, today: NaiveDate) -> Result<DataSet> {
    let tbody = squad_tbody(doc)?;
    let mut ds = DataSet::empty(&ROSTER_COLUMNS);

    for tr in rows(tbody) {
        let tds = cells(tr);
        if tds.len() < 10 {
            return Err(ScrapeError::layout(format!("roster row with {} cells", tds.len())));
        }
        let p = player_cell(tds[1])?;
        let birth = text(tds[2]);
        let since = date(&text(tds[6]));

        ds.push_row(vec![
            Value::Int(count(&text(tds[0]))),
            Value::text(p.name.as_str()),
            Value::text(last_word(&p.name)),
            Value::text_or_null(p.position),
            date(&birth).into(),
            german_float(&text(tds[4])).into(),
            Value::text_or_null(text(tds[5])),
            since.into(),
            date(&text(tds[8])).into(),
            market_value(&text(tds[tds.len() - 1])).into(),
            p.image.into(),
            id_value(p.id),
            p.slug.into(),
            in_parens(&birth).into(),
            since.map(|d| (today - d).num_days()).into(),
        ])?;
    }
    Ok(ds)
}

pub fn parse_roster(doc: &Html) -> Result<DataSet> {
    parse_roster_at(doc, chrono::Local::now().date_naive())
}

pub fn fetch_roster(fetcher: &dyn Fetch, domain: Domain, club: &Club, season: u16) -> Result<DataSet> {
    let doc = page(fetcher, &roster_url(domain, club, season))?;
    let ds = parse_roster(&doc)?;
    logf!("Kaderdaten {}-{season} - retrieved ({} players)", club.slug, ds.len());
    Ok(ds)
}

/// Cell layout: #, player, age, nationality, in squad, appearances, goals,
/// assists, yellow, second yellow, red, subbed on, subbed off, points per
/// match, minutes.
pub fn parse_performance(doc: &Html) -> Result<DataSet> {
    let tbody = squad_tbody(doc)?;
    let mut ds = DataSet::empty(&PERFORMANCE_COLUMNS);

    for tr in rows(tbody) {
        let tds = cells(tr);
        if tds.len() < 15 {
            return Err(ScrapeError::layout(format!("performance row with {} cells", tds.len())));
        }
        let p = player_cell(tds[1])?;
        let t = |i: usize| text(tds[i]);

        let stats: Vec<i64> = (4..=12).map(|i| count(&t(i))).collect();
        let (games, goals, assists) = (stats[1], stats[2], stats[3]);
        let minutes = count(&t(14));

        let mut row = vec![
            Value::Int(count(&t(0))),
            Value::text(p.name.as_str()),
            Value::text(last_word(&p.name)),
            Value::text_or_null(p.position),
            int_or_null(&t(2).replace('†', "")).into(),
        ];
        row.extend(stats.iter().map(|v| Value::Int(*v)));
        row.extend([
            german_float(&t(13)).into(),
            Value::Int(minutes),
            id_value(p.id),
            p.slug.into(),
            Value::Int(goals + assists),
            Value::Int(if games > 0 { minutes / games } else { 0 }),
        ]);
        ds.push_row(row)?;
    }
    Ok(ds)
}

pub fn fetch_performance(
    fetcher: &dyn Fetch,
    domain: Domain,
    club: &Club,
    season: u16,
    league: Option<&str>,
) -> Result<DataSet> {
    let doc = page(fetcher, &performance_url(domain, club, season, league))?;
    let ds = parse_performance(&doc)?;
    logf!("Leistungsdaten {}-{season} - retrieved ({} players)", club.slug, ds.len());
    Ok(ds)
}

/// Roster and performance of one club season: `(roster, performance)`.
pub fn fetch_club_data(
    fetcher: &dyn Fetch,
    domain: Domain,
    club: &Club,
    season: u16,
    league: Option<&str>,
) -> Result<(DataSet, DataSet)> {
    let roster = fetch_roster(fetcher, domain, club, season)?;
    let performance = fetch_performance(fetcher, domain, club, season, league)?;
    Ok((roster, performance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls() {
        let bvb = Club::new("borussia-dortmund", 16);
        assert_eq!(
            roster_url(Domain::De, &bvb, 2019),
            "https://www.transfermarkt.de/borussia-dortmund/kader/verein/16/saison_id/2019/plus/1"
        );
        assert_eq!(
            performance_url(Domain::De, &bvb, 2019, Some("L1")),
            "https://www.transfermarkt.de/borussia-dortmund/leistungsdaten/verein/16/plus/1?reldata=L1%262019"
        );
        assert_eq!(
            performance_url(Domain::De, &bvb, 2019, None),
            "https://www.transfermarkt.de/borussia-dortmund/leistungsdaten/verein/16/reldata/%262019/plus/1"
        );
    }
}
