// src/specs/player_stats.rs
//
// Per-player performance pages:
// - detailed performance per season and competition ("leistungsdatendetails")
// - games per position, summed or detailed per position

use scraper::{ElementRef, Html};

use crate::config::{Domain, ScrapeOptions};
use crate::core::html::{self, attr, cells, href_segment, rows, segment_after, table_from_tbody, text};
use crate::core::net::{pause, Fetch};
use crate::core::sanitize::{count, german_float};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};
use crate::positions::Position;
use crate::progress::Progress;

use super::{or_empty, page, Player};

pub const PERFORMANCE_COLUMNS: [&str; 20] = [
    "Season", "Competition", "competition_string", "Club", "club_string", "In Squad",
    "Games Played", "PPG", "Goals", "Assists", "Own Goals", "Subbed In", "Subbed Out", "Yellow",
    "2nd Yellow", "Red", "Penalty Goals", "Minutes per Goal", "Minutes", "player_id",
];

pub const POSITION_COLUMNS: [&str; 5] = ["Position", "Games Played", "Goals", "Assists", "player_id"];

pub const DETAILED_COLUMNS: [&str; 18] = [
    "Season", "Competition", "In Squad", "Games Played", "PPG", "Goals", "Assists", "Own Goals",
    "Subbed In", "Subbed Out", "Yellow", "2nd Yellow", "Red", "Penalty Goals", "Minutes per Goal",
    "Minutes", "Position", "player_id",
];

/// Season, competition crest, competition, club crest, then 14 numbers.
const ROW_WIDTH: usize = 18;

/// Which seasons the position summary covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Span {
    #[default]
    Current,
    All,
}

impl std::str::FromStr for Span {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "curr" | "current" => Ok(Span::Current),
            "all" => Ok(Span::All),
            other => Err(format!("Unknown span: {other} (expected curr or all)")),
        }
    }
}

pub fn performance_url(domain: Domain, player: &Player) -> String {
    format!(
        "{}/{}/leistungsdatendetails/spieler/{}/saison//verein/0/liga/0/wettbewerb//pos/0/trainer_id/0/plus/1",
        domain.base_url(), player.slug_or("player"), player.id
    )
}

pub fn position_summary_url(domain: Domain, player: &Player, span: Span) -> String {
    let page = match span {
        Span::Current => "leistungsdaten",
        Span::All => "leistungsdatendetails",
    };
    format!("{}/{}/{page}/spieler/{}", domain.base_url(), player.slug_or("player-name"), player.id)
}

pub fn position_detail_url(domain: Domain, player: &Player, pos: &str) -> String {
    format!(
        "{}/{}/leistungsdatendetails/spieler/{}/plus/1?saison=&verein=&liga=&wettbewerb=&pos={pos}&trainer_id=",
        domain.base_url(), player.slug_or("player-name"), player.id
    )
}

fn position_placeholder(domain: Domain) -> &'static str {
    if domain.is_german() { "Position auswählen" } else { "Filter by position" }
}

/* ---------------- Detailed performance ---------------- */

/// Numbers from "In Squad" on: PPG as float, everything else as count.
fn stat_values(tds: &[ElementRef<'_>]) -> Vec<Value> {
    tds.iter()
        .enumerate()
        .map(|(i, td)| {
            let t = text(*td);
            if i == 2 { Value::Float(german_float(&t).unwrap_or(0.0)) } else { Value::Int(count(&t)) }
        })
        .collect()
}

/// Performance rows live in the page's second tbody.
fn performance_rows(doc: &Html) -> Result<Vec<ElementRef<'_>>> {
    let tbody = html::nth(doc, "tbody", 1)?;
    let body = rows(tbody);
    if body.iter().any(|tr| cells(*tr).len() < ROW_WIDTH) {
        return Err(ScrapeError::layout("performance table narrower than expected"));
    }
    Ok(body)
}

pub fn parse_performance(doc: &Html, player_id: u32) -> Result<DataSet> {
    let mut ds = DataSet::empty(&PERFORMANCE_COLUMNS);

    for tr in performance_rows(doc)? {
        let tds = cells(tr);
        let comp_href = html::select_in(tr, "a")?
            .into_iter()
            .filter_map(|a| attr(a, "href"))
            .find_map(|h| segment_after(h, "wettbewerb").map(|s| s!(s)));
        let club = html::first_in(tds[3], "img")?.and_then(|i| attr(i, "alt").or_else(|| attr(i, "title")));
        let club_href = html::first_in(tds[3], "a")?.and_then(|a| attr(a, "href"));

        let mut row = vec![
            Value::text(text(tds[0])),
            Value::text(text(tds[2])),
            comp_href.into(),
            club.map(|s| s!(s)).into(),
            club_href.and_then(|h| href_segment(h, 1)).map(|s| s!(s)).into(),
        ];
        row.extend(stat_values(&tds[4..ROW_WIDTH]));
        row.push(Value::Int(player_id as i64));
        ds.push_row(row)?;
    }
    Ok(ds)
}

/// Empty table (with `player_id` column) when the player has no record.
pub fn fetch_performance(fetcher: &dyn Fetch, domain: Domain, player: &Player) -> Result<DataSet> {
    let doc = page(fetcher, &performance_url(domain, player))?;
    or_empty(parse_performance(&doc, player.id), &PERFORMANCE_COLUMNS, "player performance")
}

/* ---------------- Games by position ---------------- */

/// Summary table: rows of exactly Position, games, goals, assists, where the
/// position is one the site knows. Falls back to the fourth tbody from the end.
pub fn parse_position_summary(doc: &Html, player_id: u32) -> Result<DataSet> {
    let mut table = None;
    for tbody in html::select_all(doc, "tbody")? {
        let t = table_from_tbody(tbody, true);
        if !t.is_empty() && t.iter().all(|r| r.len() == 4 && Position::from_any(&r[0]).is_some()) {
            table = Some(t);
            break;
        }
    }
    let table = match table {
        Some(t) => t,
        None => table_from_tbody(html::nth_last(doc, "tbody", 3)?, true),
    };

    let mut ds = DataSet::empty(&POSITION_COLUMNS);
    for r in table {
        if r.len() != 4 {
            return Err(ScrapeError::layout(format!("position row with {} cells", r.len())));
        }
        ds.push_row(vec![
            Value::text(r[0].as_str()),
            Value::Int(count(&r[1])),
            Value::Int(count(&r[2])),
            Value::Int(count(&r[3])),
            Value::Int(player_id as i64),
        ])?;
    }
    Ok(ds)
}

/// `(value, label)` of every option of the position filter, placeholder excluded.
pub fn parse_position_options(doc: &Html, domain: Domain) -> Result<Vec<(String, String)>> {
    let css = format!(r#"select[data-placeholder="{}"]"#, position_placeholder(domain));
    let select = html::select_all(doc, &css)?
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::layout("no position filter"))?;

    Ok(html::select_in(select, "option")?
        .into_iter()
        .skip(1)
        .filter_map(|o| attr(o, "value").map(|v| (s!(v), text(o))))
        .collect())
}

/// Detailed rows for one position filter; link columns are left out.
pub fn parse_position_detail(doc: &Html, position: &str, player_id: u32) -> Result<DataSet> {
    let mut ds = DataSet::empty(&DETAILED_COLUMNS);
    for tr in performance_rows(doc)? {
        let tds = cells(tr);
        let mut row = vec![Value::text(text(tds[0])), Value::text(text(tds[2]))];
        row.extend(stat_values(&tds[4..ROW_WIDTH]));
        row.push(Value::text(position));
        row.push(Value::Int(player_id as i64));
        ds.push_row(row)?;
    }
    Ok(ds)
}

/// Summary for `span`, or with `detailed` one request per position option.
pub fn fetch_games_by_position(
    fetcher: &dyn Fetch,
    opts: &ScrapeOptions,
    player: &Player,
    span: Span,
    detailed: bool,
    mut progress: Option<&mut dyn Progress>,
) -> Result<DataSet> {
    let domain = opts.domain;
    if !detailed {
        let doc = page(fetcher, &position_summary_url(domain, player, span))?;
        return parse_position_summary(&doc, player.id);
    }

    let doc = page(fetcher, &performance_url(domain, player))?;
    let options = parse_position_options(&doc, domain)?;
    if let Some(p) = progress.as_deref_mut() {
        p.begin(options.len());
    }

    let mut all = DataSet::empty(&DETAILED_COLUMNS);
    for (i, (value, label)) in options.iter().enumerate() {
        pause(opts);
        let url = position_detail_url(domain, player, value);
        logd!("{url}");
        let doc = page(fetcher, &url)?;
        let id = value.parse::<u32>().unwrap_or(i as u32);
        match parse_position_detail(&doc, label, player.id) {
            Ok(ds) => {
                all.append(ds)?;
                if let Some(p) = progress.as_deref_mut() { p.item_done(id); }
            }
            Err(e) if e.is_layout() => {
                logw!("position {label}: {e}");
                if let Some(p) = progress.as_deref_mut() { p.item_failed(id, &e.to_string()); }
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(all)
}
