// src/core/html.rs
// DOM helpers over `scraper`. Pages are small; everything here is eager and
// returns owned Vecs so the specs can index rows and cells freely.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};
use super::sanitize::normalize_ws;

pub fn parse(doc: &str) -> Html {
    Html::parse_document(doc)
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(s!(css)))
}

/// All matches in document order.
pub fn select_all<'a>(doc: &'a Html, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).collect())
}

/// All matches below `el`, in document order.
pub fn select_in<'a>(el: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(el.select(&sel).collect())
}

pub fn first_in<'a>(el: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(el.select(&sel).next())
}

/// The n-th match in the document, or a layout error naming what was missing.
pub fn nth<'a>(doc: &'a Html, css: &str, n: usize) -> Result<ElementRef<'a>> {
    select_all(doc, css)?
        .get(n)
        .copied()
        .ok_or_else(|| ScrapeError::layout(format!("no {css} #{n}")))
}

/// The n-th match counted from the end (`0` = last).
pub fn nth_last<'a>(doc: &'a Html, css: &str, n: usize) -> Result<ElementRef<'a>> {
    let all = select_all(doc, css)?;
    all.len()
        .checked_sub(n + 1)
        .and_then(|i| all.get(i).copied())
        .ok_or_else(|| ScrapeError::layout(format!("no {css} #-{}", n + 1)))
}

/// Direct element children with the given tag name. Nested tables stay out.
pub fn children<'a>(el: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name().eq_ignore_ascii_case(tag))
        .collect()
}

/// `<tr>` rows directly under a `<tbody>` / `<table>`.
pub fn rows<'a>(tbody: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    children(tbody, "tr")
}

/// `<td>` cells directly under a `<tr>`.
pub fn cells<'a>(tr: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    children(tr, "td")
}

/// Concatenated text nodes, untouched.
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Visible text with whitespace (including &nbsp;) collapsed and trimmed.
pub fn text(el: ElementRef<'_>) -> String {
    normalize_ws(&raw_text(el))
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Path segment `i` of an href split on '/'. Site hrefs start with '/', so
/// `/fc-barcelona/startseite/verein/131` has the slug at 1 and the id at 4.
pub fn href_segment(href: &str, i: usize) -> Option<&str> {
    href.split('/').nth(i).filter(|s| !s.is_empty())
}

/// Segment following `key`, e.g. `wettbewerb` → `GB1`.
pub fn segment_after<'a>(href: &'a str, key: &str) -> Option<&'a str> {
    let mut parts = href.split('/');
    while let Some(p) = parts.next() {
        if p == key {
            return parts.next().filter(|s| !s.is_empty());
        }
    }
    None
}

/// Last non-empty path segment (query string excluded).
pub fn last_segment(href: &str) -> Option<&str> {
    let path = href.split('?').next().unwrap_or(href);
    path.rsplit('/').find(|s| !s.is_empty())
}

/// `<th>` texts of a header row.
pub fn table_columns(thead: ElementRef<'_>) -> Result<Vec<String>> {
    Ok(select_in(thead, "th")?.into_iter().map(text).collect())
}

/// Cell texts of every direct row of `tbody`.
/// With `rid_empty`, empty cells are dropped, so image-only columns vanish.
pub fn table_from_tbody(tbody: ElementRef<'_>, rid_empty: bool) -> Vec<Vec<String>> {
    rows(tbody)
        .into_iter()
        .map(|tr| {
            cells(tr)
                .into_iter()
                .map(text)
                .filter(|t| !rid_empty || !t.is_empty())
                .collect()
        })
        .collect()
}
