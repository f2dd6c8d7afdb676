// tests/placements.rs
mod common;

use std::time::Duration;

use tm_scrape::config::{Domain, ScrapeOptions};
use tm_scrape::core::StaticFetcher;
use tm_scrape::progress::RecordingProgress;
use tm_scrape::specs::{placements, Club};
use tm_scrape::{ScrapeError, Value};

use common::{doc, fixture};

/// Test-only accessor for reading integer cells out of `DataSet::column`.
trait ValueExt {
    fn as_int(&self) -> Option<i64>;
}

impl ValueExt for Value {
    fn as_int(&self) -> Option<i64> {
        match self { Value::Int(i) => Some(*i), _ => None }
    }
}

fn bvb() -> Club {
    Club::new("borussia-dortmund", 16)
}

#[test]
fn league_placements_add_points_and_games() {
    let ds = placements::parse_league_placements(&doc("placements_bvb.html")).unwrap();
    assert_eq!(ds.headers, placements::LEAGUE_COLUMNS);
    assert_eq!(ds.len(), 2);

    assert_eq!(ds.get(0, "Saison"), Some(&Value::text("19/20")));
    assert_eq!(ds.get(0, "Liga"), Some(&Value::text("Bundesliga")));
    assert_eq!(ds.get(0, "Trainer"), Some(&Value::text("Lucien Favre")));
    assert_eq!(ds.get(0, "GF"), Some(&Value::Int(84)));
    assert_eq!(ds.get(0, "GA"), Some(&Value::Int(41)));
    assert_eq!(ds.get(0, "Pts"), Some(&Value::Int(69)));
    assert_eq!(ds.get(0, "Games Played"), Some(&Value::Int(34)));
    assert_eq!(
        ds.get(0, "Liga Image Links"),
        Some(&Value::text("https://tmssl.akamaized.net/images/logo/medium/l1.png"))
    );
}

#[test]
fn two_point_era_keeps_printed_points() {
    let ds = placements::parse_league_placements(&doc("placements_bvb.html")).unwrap();
    assert_eq!(ds.get(1, "Punkte"), Some(&Value::text("54:22")));
    assert_eq!(ds.get(1, "GD"), Some(&Value::Int(56)));
    // three points per win, recomputed
    assert_eq!(ds.get(1, "Pts"), Some(&Value::Int(76)));
    assert_eq!(ds.get(1, "Games Played"), Some(&Value::Int(38)));
}

#[test]
fn gameweek_rows_carry_club_and_year() {
    let club = bvb();
    let ds = placements::parse_gameweek_placements(&doc("placements_bvb_gw1.html"), &club, 1, 20).unwrap();
    assert_eq!(ds.headers, placements::GAMEWEEK_COLUMNS);
    assert_eq!(ds.len(), 2);

    assert_eq!(ds.get(0, "GF"), Some(&Value::Int(5)));
    assert_eq!(ds.get(0, "GA"), Some(&Value::Int(1)));
    assert_eq!(ds.get(0, "Punkte"), Some(&Value::Int(3)));
    assert_eq!(ds.get(0, "club"), Some(&Value::text("Borussia Dortmund")));
    assert_eq!(ds.get(0, "club_href"), Some(&Value::text("/borussia-dortmund/startseite/verein/16")));
    assert_eq!(ds.get(0, "club_id"), Some(&Value::Int(16)));
    assert_eq!(ds.get(0, "Spieltag"), Some(&Value::Int(1)));
    assert_eq!(ds.get(0, "Jahr"), Some(&Value::Int(2019)));
    assert_eq!(
        ds.get(0, "img_link"),
        Some(&Value::text("https://tmssl.akamaized.net/images/logo/medium/l1.png"))
    );

    // "1:1" points on old pages: the part before ':'
    assert_eq!(ds.get(1, "Punkte"), Some(&Value::Int(1)));
    assert_eq!(ds.get(1, "Jahr"), Some(&Value::Int(1998)));
}

#[test]
fn gameweek_loop_skips_pages_without_table() {
    let club = bvb();
    let opts = ScrapeOptions { max_gameweeks: 3, ..ScrapeOptions::no_delay() };
    let fetcher = StaticFetcher::new()
        .with_page(&placements::gameweek_url(Domain::De, &club, 1), fixture("placements_bvb_gw1.html"))
        .with_page(&placements::gameweek_url(Domain::De, &club, 2), fixture("placements_bvb_gw2.html"))
        .with_page(&placements::gameweek_url(Domain::De, &club, 3), fixture("placements_bvb_gw_empty.html"));

    let mut progress = RecordingProgress::default();
    let ds = placements::fetch_gameweek_placements(&fetcher, &opts, &club, Some(&mut progress)).unwrap();

    assert_eq!(ds.len(), 4);
    let gameweeks: Vec<i64> = ds.column("Spieltag").filter_map(Value::as_int).collect();
    assert_eq!(gameweeks, vec![1, 1, 2, 2]);
    assert_eq!(ds.get(2, "GF"), Some(&Value::Int(8)));

    assert_eq!(progress.total, Some(3));
    assert_eq!(progress.done, vec![1, 2]);
    assert_eq!(progress.failed, vec![3]);
    assert!(progress.finished);
    assert_eq!(
        fetcher.requested().last().map(String::as_str),
        Some("https://www.transfermarkt.de/borussia-dortmund/platzierungen/verein/16/spieltag/3")
    );
}

#[test]
fn gameweek_loop_stops_on_fetch_errors() {
    let club = bvb();
    let opts = ScrapeOptions { max_gameweeks: 2, delay: Duration::ZERO, ..ScrapeOptions::no_delay() };
    let fetcher = StaticFetcher::new()
        .with_page(&placements::gameweek_url(Domain::De, &club, 1), fixture("placements_bvb_gw1.html"));

    let err = placements::fetch_gameweek_placements(&fetcher, &opts, &club, None).unwrap_err();
    assert!(matches!(err, ScrapeError::Missing(_)));
}

#[test]
fn league_placements_fetch() {
    let club = bvb();
    let fetcher = StaticFetcher::new()
        .with_page(&placements::league_url(Domain::De, &club), fixture("placements_bvb.html"));

    let ds = placements::fetch_league_placements(&fetcher, Domain::De, &club).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(
        fetcher.requested(),
        vec!["https://www.transfermarkt.de/borussia-dortmund/platzierungen/verein/16"]
    );
}
