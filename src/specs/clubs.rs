// src/specs/clubs.rs
//
// League club lists, club colours and club crests.

use scraper::Html;

use crate::config::consts::{DEFAULT_COLORS, EMBLEM_URL};
use crate::config::Domain;
use crate::core::html::{self, attr, href_segment};
use crate::core::net::Fetch;
use crate::data::{DataSet, Value};
use crate::error::Result;

use super::{page, Club};

pub const COLUMNS: [&str; 2] = ["club_name", "club_id"];

/// League start page. Without league name and season the site's jumplist
/// redirect is used.
pub fn league_url(domain: Domain, abbrev: &str, league_name: Option<&str>, season: Option<u16>) -> String {
    let base = domain.base_url();
    match (league_name, season) {
        (None, None) => format!("{base}/jumplist/startseite/wettbewerb/{abbrev}"),
        (Some(name), None) => format!("{base}/{name}/startseite/wettbewerb/{abbrev}/"),
        (name, Some(season)) => format!(
            "{base}/{}/startseite/wettbewerb/{abbrev}/plus/?saison_id={season}",
            name.unwrap_or("jumplist")
        ),
    }
}

/// Every distinct club start page linked from the page, in page order.
pub fn parse_league_clubs(doc: &Html) -> Result<DataSet> {
    let mut seen: Vec<(String, i64)> = Vec::new();

    for a in html::select_all(doc, "a.vereinprofil_tooltip")? {
        let Some(href) = attr(a, "href") else { continue };
        if !href.contains("startseite") {
            continue;
        }
        let (Some(slug), Some(id)) = (href_segment(href, 1), href_segment(href, 4)) else { continue };
        let Ok(id) = id.parse::<i64>() else { continue };
        if !seen.iter().any(|(_, known)| *known == id) {
            seen.push((s!(slug), id));
        }
    }

    let mut ds = DataSet::empty(&COLUMNS);
    for (slug, id) in seen {
        ds.push_row(vec![Value::text(slug), Value::Int(id)])?;
    }
    Ok(ds)
}

pub fn fetch_league_clubs(
    fetcher: &dyn Fetch,
    domain: Domain,
    abbrev: &str,
    league_name: Option<&str>,
    season: Option<u16>,
) -> Result<DataSet> {
    let doc = page(fetcher, &league_url(domain, abbrev, league_name, season))?;
    let ds = parse_league_clubs(&doc)?;
    logd!("{abbrev}: {} clubs", ds.len());
    Ok(ds)
}

pub fn colors_url(domain: Domain, club: &Club) -> String {
    format!("{}/{}/datenfakten/verein/{}", domain.base_url(), club.slug, club.id)
}

/// Colours from the `p.vereinsfarbe` swatches (`style="background-color:#FFDD00;"`).
/// Clubs without swatches get white/black.
pub fn parse_colors(doc: &Html) -> Result<Vec<String>> {
    let Some(p) = html::select_all(doc, "p.vereinsfarbe")?.into_iter().next() else {
        return Ok(default_colors());
    };

    let colors: Vec<String> = html::select_in(p, "span")?
        .into_iter()
        .filter_map(|span| attr(span, "style"))
        .filter_map(|style| style.split_once(':').map(|(_, v)| v.replace(';', "").trim().to_string()))
        .filter(|c| !c.is_empty())
        .collect();

    if colors.is_empty() { Ok(default_colors()) } else { Ok(colors) }
}

fn default_colors() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| s!(*c)).collect()
}

pub fn fetch_colors(fetcher: &dyn Fetch, domain: Domain, club: &Club) -> Result<Vec<String>> {
    let doc = page(fetcher, &colors_url(domain, club))?;
    parse_colors(&doc)
}

pub fn emblem_url(club_id: u32) -> String {
    format!("{EMBLEM_URL}/{club_id}.png")
}

/// Raw PNG bytes of the club crest.
pub fn fetch_emblem(fetcher: &dyn Fetch, club_id: u32) -> Result<Vec<u8>> {
    fetcher.get_bytes(&emblem_url(club_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_urls() {
        assert_eq!(
            league_url(Domain::De, "GB1", None, None),
            "https://www.transfermarkt.de/jumplist/startseite/wettbewerb/GB1"
        );
        assert_eq!(
            league_url(Domain::De, "GB1", Some("premier-league"), None),
            "https://www.transfermarkt.de/premier-league/startseite/wettbewerb/GB1/"
        );
        assert_eq!(
            league_url(Domain::Com, "L1", Some("bundesliga"), Some(2018)),
            "https://www.transfermarkt.com/bundesliga/startseite/wettbewerb/L1/plus/?saison_id=2018"
        );
    }

    #[test]
    fn emblem_link() {
        assert_eq!(emblem_url(16), "https://tmssl.akamaized.net//images/wappen/big/16.png");
    }

    #[test]
    fn colors_strip_style_noise() {
        let doc = html::parse(
            r#"<p class="vereinsfarbe"><span style="background-color:#FFFF00;"></span><span style=""></span><span style="background-color: #000000;"></span></p>"#,
        );
        assert_eq!(parse_colors(&doc).unwrap(), vec!["#FFFF00", "#000000"]);
    }

    #[test]
    fn colors_default_without_swatches() {
        let doc = html::parse("<p>keine Farben</p>");
        assert_eq!(parse_colors(&doc).unwrap(), vec!["w", "k"]);
    }
}
