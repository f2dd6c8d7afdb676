// src/specs/national_team.rs
//
// National team appearances of a player, over every national team
// (senior, U21, U19, …) the team filter offers.
//
// The first page shows the first team of the filter; each further team has
// its own page. On each page the games are the last tbody. Rows without a
// match report link are competition headers. Game rows have 15 direct
// cells: 0-1 unused, 2 date, 3 ground, 4 team crest, 5 opponent crest,
// 6 opponent, 7 result, 8 position, 9 goals, 10 assists, 11 yellow,
// 12 second yellow, 13 red, 14 minutes. Bench appearances collapse
// everything after the position into one cell.

use scraper::Html;

use crate::config::ScrapeOptions;
use crate::config::Domain;
use crate::core::html::{self, attr, cells, has_class, last_segment, rows, text};
use crate::core::net::{pause, Fetch};
use crate::core::sanitize::{date_with, int_or_null};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};
use crate::progress::Progress;

use super::{or_empty, page, Player};

pub const COLUMNS: [&str; 19] = [
    "Date", "Ground", "Team", "Opponent", "Result", "game_outcome", "competition", "game_id",
    "team_id", "team_year", "opponent_id", "opponent_year", "Position", "Goals", "Assists",
    "Yellow", "2ndYellow", "Red", "Minutes",
];

const BENCH: [&str; 2] = ["ohne Einsatz im Kader", "on the bench"];

pub fn url(domain: Domain, player: &Player) -> String {
    format!("{}/{}/nationalmannschaft/spieler/{}", domain.base_url(), player.slug_or("player-name"), player.id)
}

pub fn team_url(domain: Domain, player: &Player, team: &str) -> String {
    format!("{}/plus/0/verein_id/{team}", url(domain, player))
}

fn team_placeholder(domain: Domain) -> &'static str {
    if domain.is_german() { "Nationalteam wählen" } else { "Filter by national team" }
}

/// `(value, label)` of every national team in the filter, in page order.
pub fn parse_team_options(doc: &Html, domain: Domain) -> Result<Vec<(String, String)>> {
    let css = format!(r#"select.chzn-select[data-placeholder="{}"]"#, team_placeholder(domain));
    let Some(select) = html::select_all(doc, &css)?.into_iter().next() else {
        return Err(ScrapeError::layout("no national team filter"));
    };
    Ok(html::select_in(select, "option")?
        .into_iter()
        .filter_map(|o| attr(o, "value").map(|v| (s!(v), text(o))))
        .collect())
}

/// "W" / "L" from the result colour, "D" otherwise.
fn outcome(result_td: scraper::ElementRef<'_>) -> Result<&'static str> {
    let last_span = html::select_in(result_td, "span")?.into_iter().last();
    Ok(match last_span {
        Some(s) if has_class(s, "greentext") => "W",
        Some(s) if has_class(s, "redtext") => "L",
        _ => "D",
    })
}

/// Stat cell: minute marks like "45'" are stripped. Missing cells are Null.
fn stat(t: &[String], i: usize) -> Value {
    t.get(i).and_then(|s| int_or_null(s)).into()
}

/// Games of one team page in chronological order.
pub fn parse_team_games(doc: &Html, dayfirst: bool) -> Result<DataSet> {
    let tbody = html::nth_last(doc, "tbody", 0)?;
    let mut ds = DataSet::empty(&COLUMNS);
    let mut competition = Value::Null;

    for tr in rows(tbody) {
        let Some(report) = html::first_in(tr, "a.ergebnis-link")? else {
            let header = html::select_in(tr, "a")?.into_iter().last().map(text).unwrap_or_else(|| text(tr));
            competition = Value::text_or_null(header);
            continue;
        };

        let tds = cells(tr);
        if tds.len() < 9 {
            return Err(ScrapeError::layout(format!("national team game with {} cells", tds.len())));
        }
        let t: Vec<String> = tds.iter().map(|td| text(*td)).collect();

        let teams = html::select_in(tr, "a.vereinprofil_tooltip")?;
        let team_info = |i: usize| -> (Value, Value) {
            match teams.get(i) {
                Some(a) => (
                    attr(*a, "id").and_then(|s| s.parse::<i64>().ok()).into(),
                    attr(*a, "href").and_then(last_segment).and_then(|s| s.parse::<i64>().ok()).into(),
                ),
                None => (Value::Null, Value::Null),
            }
        };
        let (team_id, team_year) = team_info(0);
        let (opponent_id, opponent_year) = team_info(1);

        let team = html::first_in(tr, "img")?.and_then(|i| attr(i, "alt")).map(|s| s!(s));
        let position = t[8].clone();
        let minutes = if BENCH.contains(&position.as_str()) { Value::Int(0) } else { stat(&t, 14) };

        ds.push_row(vec![
            date_with(&t[2], dayfirst).into(),
            Value::text_or_null(t[3].as_str()),
            team.into(),
            Value::text(t[6].as_str()),
            Value::text(t[7].as_str()),
            Value::text(outcome(tds[7])?),
            competition.clone(),
            attr(report, "id").map(|s| s!(s)).into(),
            team_id,
            team_year,
            opponent_id,
            opponent_year,
            Value::text_or_null(position),
            stat(&t, 9),
            stat(&t, 10),
            stat(&t, 11),
            stat(&t, 12),
            stat(&t, 13),
            minutes,
        ])?;
    }

    ds.rows.reverse();
    Ok(ds)
}

/// All national teams of a player. Empty table when the player never
/// played for one.
pub fn fetch_history(
    fetcher: &dyn Fetch,
    opts: &ScrapeOptions,
    player: &Player,
    mut progress: Option<&mut dyn Progress>,
) -> Result<DataSet> {
    let domain = opts.domain;
    let first = page(fetcher, &url(domain, player))?;
    let teams = match parse_team_options(&first, domain) {
        Ok(t) => t,
        Err(e) if e.is_layout() => {
            logw!("national team history of {}: {e}", player.id);
            return Ok(DataSet::empty(&COLUMNS));
        }
        Err(e) => return Err(e),
    };

    if let Some(p) = progress.as_deref_mut() {
        p.begin(teams.len());
    }

    let mut all = DataSet::empty(&COLUMNS);
    for (i, (value, label)) in teams.iter().enumerate() {
        let parsed = if i == 0 {
            parse_team_games(&first, domain.dayfirst())
        } else {
            pause(opts);
            let doc = page(fetcher, &team_url(domain, player, value))?;
            parse_team_games(&doc, domain.dayfirst())
        };
        let ds = or_empty(parsed, &COLUMNS, label)?;
        logd!("{label}: {} games", ds.len());
        all.append(ds)?;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(value.parse().unwrap_or(i as u32));
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(all)
}
