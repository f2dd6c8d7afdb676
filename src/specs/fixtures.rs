// src/specs/fixtures.rs
//
// Match lists:
// - league games: every gameweek box of the full league schedule
// - cup games: round headers and match rows of a cup start page
// - team schedule: one club's games of the current season

use chrono::NaiveDate;
use scraper::{ElementRef, Html};

use crate::config::Domain;
use crate::core::html::{self, attr, cells, has_class, href_segment, rows, text};
use crate::core::net::Fetch;
use crate::core::sanitize::{count, date_with, normalize_ws, rank, score, split_result};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};

use super::page;

pub const LEAGUE_COLUMNS: [&str; 12] = [
    "Home", "Result", "Away", "Home_Rank", "Away_Rank", "Date", "Spieltag", "Report_Link",
    "Home_Link", "Away_Link", "Home_Goals", "Away_Goals",
];

pub const CUP_COLUMNS: [&str; 11] = [
    "Round", "Date", "Home", "Away", "Result", "Home_Link", "Away_Link", "Report_Link", "Period",
    "Home_Goals", "Away_Goals",
];

pub const SCHEDULE_COLUMNS: [&str; 13] = [
    "Competition", "Gameweek", "Day", "Date", "Time", "Ground", "Rank", "Opponent", "System",
    "Attendance", "Result", "club_string", "club_id",
];

/// Caller URL plus an optional season.
pub fn with_season(url: &str, year: Option<u16>) -> String {
    match year {
        Some(y) => format!("{url}?saison_id={y}"),
        None => s!(url),
    }
}

pub fn schedule_url(domain: Domain, team_id: u32) -> String {
    format!("{}/teamname/spielplandatum/verein/{team_id}", domain.base_url())
}

/// First token of `s` that reads as a date.
fn find_date(s: &str, dayfirst: bool) -> Option<NaiveDate> {
    s.split_whitespace().find_map(|tok| date_with(tok, dayfirst))
}

fn first_href<'a>(el: ElementRef<'a>, css: &str) -> Result<Option<&'a str>> {
    Ok(html::first_in(el, css)?.and_then(|a| attr(a, "href")))
}

fn goals(result: &str) -> (Value, Value) {
    match score(result) {
        Some((h, a)) => (Value::Int(h), Value::Int(a)),
        None => (Value::Null, Value::Null),
    }
}

/* ---------------- League games ---------------- */

/// Team cell: club link text plus a "(3.)" table position.
fn team_cell(td: ElementRef<'_>) -> Result<(String, Value, Option<String>)> {
    let link = html::first_in(td, "a.vereinprofil_tooltip")?;
    let full = text(td);
    let name = match link {
        Some(a) if !text(a).is_empty() => text(a),
        _ => {
            let stripped: String = full.split(['(', ')']).enumerate()
                .filter(|(i, _)| i % 2 == 0)
                .map(|(_, part)| part)
                .collect();
            normalize_ws(&stripped)
        }
    };
    let rank_text = full.split_once('(').and_then(|(_, r)| r.split_once(')')).map(|(r, _)| r);
    let href = link.and_then(|a| attr(a, "href")).map(|s| s!(s));
    Ok((name, rank_text.and_then(rank).into(), href))
}

/// Every game in every gameweek box (`div.box` holding a `div.table-header`
/// label and a table). Game rows have 7 direct cells:
/// date, time, home, crest, result, crest, away. The date is only printed
/// on the first game of a day and carries forward.
pub fn parse_league_games(doc: &Html, dayfirst: bool) -> Result<DataSet> {
    let mut ds = DataSet::empty(&LEAGUE_COLUMNS);

    for bx in html::select_all(doc, "div.box")? {
        let Some(header) = html::first_in(bx, "div.table-header")? else { continue };
        let Some(tbody) = html::first_in(bx, "tbody")? else { continue };
        let gameweek = text(header);
        let mut day: Option<NaiveDate> = None;

        for tr in rows(tbody) {
            let tds = cells(tr);
            if tds.len() < 7 {
                continue;
            }
            if let Some(d) = find_date(&text(tds[0]), dayfirst) {
                day = Some(d);
            }
            let (home, home_rank, home_link) = team_cell(tds[2])?;
            let (away, away_rank, away_link) = team_cell(tds[6])?;
            let report = html::first_in(tds[4], "a.ergebnis-link")?;
            let result = match report {
                Some(a) => text(a),
                None => text(tds[4]),
            };
            let (home_goals, away_goals) = goals(&result);

            ds.push_row(vec![
                Value::text(home),
                Value::text(result.as_str()),
                Value::text(away),
                home_rank,
                away_rank,
                day.into(),
                Value::text(gameweek.as_str()),
                report.and_then(|a| attr(a, "href")).map(|s| s!(s)).into(),
                home_link.into(),
                away_link.into(),
                home_goals,
                away_goals,
            ])?;
        }
    }

    if ds.is_empty() {
        return Err(ScrapeError::layout("no gameweek boxes with games"));
    }
    Ok(ds)
}

/// `url` is a full schedule URL, e.g. `.../1-bundesliga/gesamtspielplan/wettbewerb/L1`.
pub fn fetch_league_games(fetcher: &dyn Fetch, url: &str, year: Option<u16>) -> Result<DataSet> {
    let doc = page(fetcher, &with_season(url, year))?;
    parse_league_games(&doc, Domain::from_url(url).dayfirst())
}

/* ---------------- Cup games ---------------- */

/// Rows `tr.rundenzeile` name the round; `tr.begegnungZeile` rows are games.
/// The date link (its href mentions "datum") only appears on the first game
/// of a day and carries forward.
pub fn parse_cup_games(doc: &Html, dayfirst: bool) -> Result<DataSet> {
    let mut ds = DataSet::empty(&CUP_COLUMNS);
    let mut round = Value::Null;
    let mut day: Option<NaiveDate> = None;

    for tr in html::select_all(doc, "tr.rundenzeile, tr.begegnungZeile")? {
        if has_class(tr, "rundenzeile") {
            round = Value::text_or_null(text(tr));
            continue;
        }

        for a in html::select_in(tr, "a")? {
            let is_date_link = attr(a, "href").is_some_and(|h| h.to_lowercase().contains("datum"));
            if is_date_link && !text(a).is_empty() {
                if let Some(d) = find_date(&text(a), dayfirst) {
                    day = Some(d);
                }
                break;
            }
        }

        let clubs = html::select_in(tr, "a.vereinprofil_tooltip")?;
        let home_link = clubs.first().and_then(|a| attr(*a, "href"));
        let away_link = clubs.last().filter(|_| clubs.len() > 1).and_then(|a| attr(*a, "href"));

        let crests: Vec<String> = html::select_in(tr, "img")?
            .into_iter()
            .filter_map(|img| attr(img, "alt"))
            .map(|s| s!(s))
            .collect();
        let (home, away) = match crests.as_slice() {
            [h, .., a] => (Value::text(h.as_str()), Value::text(a.as_str())),
            _ => {
                let names: Vec<String> = clubs.iter().map(|a| text(*a)).filter(|t| !t.is_empty()).collect();
                (names.first().cloned().into(), names.last().cloned().filter(|_| names.len() > 1).into())
            }
        };

        let finished = html::first_in(tr, "span.matchresult.finished")?.map(text);
        let (result, period) = match finished.as_deref() {
            Some(r) => {
                let (r, p) = split_result(r);
                (Some(r), p)
            }
            None => (None, None),
        };
        let (home_goals, away_goals) = goals(result.as_deref().unwrap_or(""));
        let report = first_href(tr, r#"a[title="Spielbericht"]"#)?;

        ds.push_row(vec![
            round.clone(),
            day.into(),
            home,
            away,
            result.into(),
            home_link.map(|s| s!(s)).into(),
            away_link.map(|s| s!(s)).into(),
            report.map(|s| s!(s)).into(),
            period.into(),
            home_goals,
            away_goals,
        ])?;
    }

    if ds.is_empty() {
        return Err(ScrapeError::layout("no cup games"));
    }
    Ok(ds)
}

/// `url` is a cup start page, e.g. `.../fa-cup/startseite/pokalwettbewerb/FAC`.
pub fn fetch_cup_games(fetcher: &dyn Fetch, url: &str, year: Option<u16>) -> Result<DataSet> {
    let doc = page(fetcher, &with_season(url, year))?;
    parse_cup_games(&doc, Domain::from_url(url).dayfirst())
}

/* ---------------- Team schedule ---------------- */

/// Schedule table: single-cell rows name the competition; game rows have
/// gameweek, "Sa 17.08.2019", time, ground, rank, crest, opponent, system,
/// attendance, result.
pub fn parse_team_schedule(doc: &Html, dayfirst: bool) -> Result<DataSet> {
    let tbody = html::select_all(doc, "table > tbody")?
        .into_iter()
        .find(|tb| rows(*tb).iter().any(|tr| cells(*tr).len() >= 10))
        .ok_or_else(|| ScrapeError::layout("no schedule table"))?;

    let mut ds = DataSet::empty(&SCHEDULE_COLUMNS);
    let mut competition = Value::Null;

    for tr in rows(tbody) {
        let tds = cells(tr);
        if tds.len() < 10 {
            let label = text(tr);
            if !label.is_empty() {
                competition = Value::text(label);
            }
            continue;
        }
        let t: Vec<String> = tds.iter().map(|td| text(*td)).collect();
        let (day, date_text) = t[1].split_once(' ').unwrap_or(("", t[1].as_str()));
        let href = first_href(tds[5], "a")?.or(first_href(tds[6], "a.vereinprofil_tooltip")?).unwrap_or("");
        let attendance = t[8].replace('x', "0");

        ds.push_row(vec![
            competition.clone(),
            Value::text(t[0].replace("Runde", "Round")),
            Value::text_or_null(day),
            date_with(date_text, dayfirst).into(),
            Value::text_or_null(t[2].as_str()),
            Value::text_or_null(t[3].as_str()),
            rank(&t[4]).into(),
            Value::text(t[6].as_str()),
            Value::text_or_null(t[7].as_str()),
            Value::Int(count(&attendance)),
            Value::text(t[9].as_str()),
            href_segment(href, 1).map(|s| s!(s)).into(),
            href_segment(href, 4).and_then(|s| s.parse::<i64>().ok()).into(),
        ])?;
    }
    Ok(ds)
}

pub fn fetch_team_schedule(fetcher: &dyn Fetch, domain: Domain, team_id: u32) -> Result<DataSet> {
    let doc = page(fetcher, &schedule_url(domain, team_id))?;
    parse_team_schedule(&doc, domain.dayfirst())
}
