// tests/squad.rs
mod common;

use tm_scrape::config::Domain;
use tm_scrape::core::StaticFetcher;
use tm_scrape::specs::{squad, Club};
use tm_scrape::Value;

use common::{doc, fixture, ymd};

#[test]
fn roster_reads_direct_cells_only() {
    let ds = squad::parse_roster_at(&doc("squad_roster_bvb_2019.html"), ymd(2020, 7, 1)).unwrap();
    assert_eq!(ds.headers, squad::ROSTER_COLUMNS);
    assert_eq!(ds.len(), 2);

    let row = |name: &str| ds.get(0, name).cloned();
    assert_eq!(row("Shirt Number"), Some(Value::Int(1)));
    assert_eq!(row("Name"), Some(Value::text("Roman Bürki")));
    assert_eq!(row("Last Name"), Some(Value::text("Bürki")));
    assert_eq!(row("Position"), Some(Value::text("Torwart")));
    assert_eq!(row("Date of Birth"), Some(Value::Date(ymd(1990, 11, 14))));
    assert_eq!(row("Age"), Some(Value::Int(29)));
    assert_eq!(row("Height"), Some(Value::Float(1.87)));
    assert_eq!(row("Footedness"), Some(Value::text("rechts")));
    assert_eq!(row("At Club Since"), Some(Value::Date(ymd(2015, 7, 1))));
    assert_eq!(row("Contract Expires"), Some(Value::Date(ymd(2023, 6, 30))));
    assert_eq!(row("Market Value"), Some(Value::Int(7_000_000)));
    assert_eq!(row("player_id"), Some(Value::Int(58358)));
    assert_eq!(row("player_string"), Some(Value::text("roman-burki")));
    assert_eq!(
        row("Image Link"),
        Some(Value::text("https://img.a.transfermarkt.technology/portrait/big/58358-1.jpg"))
    );
    assert_eq!(row("Days at Club"), Some(Value::Int(1827)));
}

#[test]
fn roster_falls_back_to_href_id_and_plain_src() {
    let ds = squad::parse_roster_at(&doc("squad_roster_bvb_2019.html"), ymd(2020, 7, 1)).unwrap();
    assert_eq!(ds.get(1, "player_id"), Some(&Value::Int(35207)));
    assert_eq!(ds.get(1, "Position"), Some(&Value::text("Linksaußen")));
    assert_eq!(
        ds.get(1, "Image Link"),
        Some(&Value::text("https://img.a.transfermarkt.technology/portrait/big/35207-1.jpg"))
    );
    assert_eq!(ds.get(1, "At Club Since"), Some(&Value::Null));
    assert_eq!(ds.get(1, "Days at Club"), Some(&Value::Null));
}

#[test]
fn performance_derives_scorer_and_minutes_per_game() {
    let ds = squad::parse_performance(&doc("squad_performance_bvb_2019.html")).unwrap();
    assert_eq!(ds.headers, squad::PERFORMANCE_COLUMNS);
    assert_eq!(ds.len(), 2);

    assert_eq!(ds.get(0, "Age"), Some(&Value::Int(31)));
    assert_eq!(ds.get(0, "In Squad"), Some(&Value::Int(34)));
    assert_eq!(ds.get(0, "Games Played"), Some(&Value::Int(30)));
    assert_eq!(ds.get(0, "Second Yellow"), Some(&Value::Int(0)));
    assert_eq!(ds.get(0, "Substituted Off"), Some(&Value::Int(10)));
    assert_eq!(ds.get(0, "PPM"), Some(&Value::Float(2.03)));
    assert_eq!(ds.get(0, "Minutes Played"), Some(&Value::Int(2371)));
    assert_eq!(ds.get(0, "Scorer"), Some(&Value::Int(23)));
    assert_eq!(ds.get(0, "Minutes per Appearance"), Some(&Value::Int(79)));
}

#[test]
fn unused_players_have_zero_minutes_and_no_ppm() {
    let ds = squad::parse_performance(&doc("squad_performance_bvb_2019.html")).unwrap();
    assert_eq!(ds.get(1, "Name"), Some(&Value::text("Marwin Hitz")));
    assert_eq!(ds.get(1, "Games Played"), Some(&Value::Int(0)));
    assert_eq!(ds.get(1, "PPM"), Some(&Value::Null));
    assert_eq!(ds.get(1, "Minutes Played"), Some(&Value::Int(0)));
    assert_eq!(ds.get(1, "Minutes per Appearance"), Some(&Value::Int(0)));
}

#[test]
fn club_data_fetches_both_pages() {
    let bvb = Club::new("borussia-dortmund", 16);
    let fetcher = StaticFetcher::new()
        .with_page(&squad::roster_url(Domain::De, &bvb, 2019), fixture("squad_roster_bvb_2019.html"))
        .with_page(
            &squad::performance_url(Domain::De, &bvb, 2019, Some("L1")),
            fixture("squad_performance_bvb_2019.html"),
        );

    let (roster, perf) = squad::fetch_club_data(&fetcher, Domain::De, &bvb, 2019, Some("L1")).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(perf.len(), 2);
    assert_eq!(fetcher.requested().len(), 2);
}
