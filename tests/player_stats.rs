// tests/player_stats.rs
mod common;

use tm_scrape::config::{Domain, ScrapeOptions};
use tm_scrape::core::StaticFetcher;
use tm_scrape::progress::RecordingProgress;
use tm_scrape::specs::player_stats::{self, Span};
use tm_scrape::specs::Player;
use tm_scrape::Value;

use common::{doc, fixture};

fn messi() -> Player {
    Player::new(28003).with_slug("lionel-messi")
}

#[test]
fn performance_rows_with_link_columns() {
    let ds = player_stats::parse_performance(&doc("player_performance_28003.html"), 28003).unwrap();
    assert_eq!(ds.headers, player_stats::PERFORMANCE_COLUMNS);
    assert_eq!(ds.len(), 2);

    assert_eq!(
        ds.rows[0],
        vec![
            Value::text("19/20"),
            Value::text("LaLiga"),
            Value::text("ES1"),
            Value::text("FC Barcelona"),
            Value::text("fc-barcelona"),
            Value::Int(35),
            Value::Int(33),
            Value::Float(2.42),
            Value::Int(25),
            Value::Int(21),
            Value::Int(0),
            Value::Int(1),
            Value::Int(6),
            Value::Int(4),
            Value::Int(0),
            Value::Int(0),
            Value::Int(3),
            Value::Int(119),
            Value::Int(2977),
            Value::Int(28003),
        ]
    );
    assert_eq!(ds.get(1, "competition_string"), Some(&Value::text("CL")));
    // no points per game shown
    assert_eq!(ds.get(1, "PPG"), Some(&Value::Float(0.0)));
}

#[test]
fn performance_fetch_is_best_effort() {
    let player = Player::new(7);
    let fetcher = StaticFetcher::new()
        .with_page(&player_stats::performance_url(Domain::De, &player), "<html><body><table><tbody></tbody></table></body></html>");

    let ds = player_stats::fetch_performance(&fetcher, Domain::De, &player).unwrap();
    assert!(ds.is_empty());
    assert_eq!(ds.headers, player_stats::PERFORMANCE_COLUMNS);
}

#[test]
fn position_summary_finds_the_position_table() {
    let ds = player_stats::parse_position_summary(&doc("player_positions_28003.html"), 28003).unwrap();
    assert_eq!(ds.headers, player_stats::POSITION_COLUMNS);
    assert_eq!(
        ds.rows,
        vec![
            vec![Value::text("Rechtsaußen"), Value::Int(21), Value::Int(15), Value::Int(10), Value::Int(28003)],
            vec![Value::text("Mittelstürmer"), Value::Int(12), Value::Int(10), Value::Int(0), Value::Int(28003)],
        ]
    );
}

#[test]
fn summary_span_picks_the_page() {
    let player = messi();
    let opts = ScrapeOptions::no_delay();
    let fetcher = StaticFetcher::new().with_page(
        &player_stats::position_summary_url(Domain::De, &player, Span::All),
        fixture("player_positions_28003.html"),
    );

    let ds = player_stats::fetch_games_by_position(&fetcher, &opts, &player, Span::All, false, None).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(
        fetcher.requested(),
        vec!["https://www.transfermarkt.de/lionel-messi/leistungsdatendetails/spieler/28003"]
    );
}

#[test]
fn position_filter_options_skip_placeholder() {
    let opts = player_stats::parse_position_options(&doc("player_performance_28003.html"), Domain::De).unwrap();
    assert_eq!(
        opts,
        vec![(String::from("14"), String::from("Mittelstürmer")), (String::from("12"), String::from("Rechtsaußen"))]
    );
}

#[test]
fn detailed_positions_one_request_each() {
    let player = messi();
    let opts = ScrapeOptions::no_delay();
    let fetcher = StaticFetcher::new()
        .with_page(&player_stats::performance_url(Domain::De, &player), fixture("player_performance_28003.html"))
        .with_page(&player_stats::position_detail_url(Domain::De, &player, "14"), fixture("player_position_detail_14.html"))
        .with_page(&player_stats::position_detail_url(Domain::De, &player, "12"), "<html><body><p>Keine Daten</p></body></html>");

    let mut progress = RecordingProgress::default();
    let ds = player_stats::fetch_games_by_position(&fetcher, &opts, &player, Span::All, true, Some(&mut progress)).unwrap();

    assert_eq!(ds.headers, player_stats::DETAILED_COLUMNS);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.get(0, "Competition"), Some(&Value::text("LaLiga")));
    assert_eq!(ds.get(0, "PPG"), Some(&Value::Float(2.5)));
    assert_eq!(ds.get(0, "Minutes"), Some(&Value::Int(1050)));
    assert_eq!(ds.get(0, "Position"), Some(&Value::text("Mittelstürmer")));
    assert_eq!(ds.get(0, "player_id"), Some(&Value::Int(28003)));

    assert_eq!(progress.total, Some(2));
    assert_eq!(progress.done, vec![14]);
    assert_eq!(progress.failed, vec![12]);
    assert_eq!(fetcher.requested().len(), 3);
}
