// tests/clubs.rs
use tm_scrape::config::Domain;
use tm_scrape::core::html;
use tm_scrape::core::StaticFetcher;
use tm_scrape::specs::{clubs, Club};
use tm_scrape::{ScrapeError, Value};

const LEAGUE_PAGE: &str = r#"<!DOCTYPE html><html><body>
<div class="responsive-table"><table class="items"><tbody>
  <tr>
    <td class="zentriert no-border-rechts"><a class="vereinprofil_tooltip" id="281" href="/manchester-city/startseite/verein/281/saison_id/2019"><img alt="Manchester City" /></a></td>
    <td class="hauptlink no-border-links"><a class="vereinprofil_tooltip" id="281" href="/manchester-city/startseite/verein/281/saison_id/2019">Manchester City</a></td>
    <td><a class="vereinprofil_tooltip" id="281" href="/manchester-city/kader/verein/281/saison_id/2019">31</a></td>
  </tr>
  <tr>
    <td class="zentriert no-border-rechts"><a class="vereinprofil_tooltip" id="31" href="/fc-liverpool/startseite/verein/31/saison_id/2019"><img alt="FC Liverpool" /></a></td>
    <td class="hauptlink no-border-links"><a class="vereinprofil_tooltip" id="31" href="/fc-liverpool/startseite/verein/31/saison_id/2019">FC Liverpool</a></td>
    <td><a class="vereinprofil_tooltip" id="31" href="/fc-liverpool/kader/verein/31/saison_id/2019">49</a></td>
  </tr>
</tbody></table></div>
<div class="box"><a class="vereinprofil_tooltip" id="281" href="/manchester-city/startseite/verein/281">Man City</a></div>
</body></html>"#;

#[test]
fn league_clubs_are_distinct_in_page_order() {
    let ds = clubs::parse_league_clubs(&html::parse(LEAGUE_PAGE)).unwrap();
    assert_eq!(ds.headers, clubs::COLUMNS);
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.rows[0], vec![Value::text("manchester-city"), Value::Int(281)]);
    assert_eq!(ds.rows[1], vec![Value::text("fc-liverpool"), Value::Int(31)]);
}

#[test]
fn fetch_league_clubs_uses_season_url() {
    let url = clubs::league_url(Domain::De, "GB1", Some("premier-league"), Some(2019));
    let fetcher = StaticFetcher::new().with_page(&url, LEAGUE_PAGE);

    let ds = clubs::fetch_league_clubs(&fetcher, Domain::De, "GB1", Some("premier-league"), Some(2019)).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(fetcher.requested(), vec![url]);
}

#[test]
fn season_without_league_name_goes_through_jumplist() {
    assert_eq!(
        clubs::league_url(Domain::De, "GB1", None, Some(2019)),
        "https://www.transfermarkt.de/jumplist/startseite/wettbewerb/GB1/plus/?saison_id=2019"
    );
}

#[test]
fn colors_and_emblem() {
    let bvb = Club::new("borussia-dortmund", 16);
    let colors_page = r#"<div class="dataDaten"><p class="vereinsfarbe">
        <span style="background-color:#FFFF00;"></span>
        <span style="background-color:#000000;"></span>
    </p></div>"#;
    let png: &[u8] = &[0x89, b'P', b'N', b'G'];
    let fetcher = StaticFetcher::new()
        .with_page(&clubs::colors_url(Domain::De, &bvb), colors_page)
        .with_page(&clubs::emblem_url(16), png);

    assert_eq!(clubs::fetch_colors(&fetcher, Domain::De, &bvb).unwrap(), vec!["#FFFF00", "#000000"]);
    assert_eq!(clubs::fetch_emblem(&fetcher, 16).unwrap(), png);
}

#[test]
fn missing_page_is_an_error_not_an_empty_list() {
    let fetcher = StaticFetcher::new();
    let err = clubs::fetch_colors(&fetcher, Domain::Com, &Club::new("fc-schalke-04", 33)).unwrap_err();
    assert!(matches!(err, ScrapeError::Missing(_)));
}
