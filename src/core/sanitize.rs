// src/core/sanitize.rs
//
// Cell cleaning. Every function takes the visible cell text and returns a
// typed value; `None` where the site shows a placeholder (`-`, `k. A.`, blank).

use chrono::NaiveDate;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Last whitespace-separated word ("Lionel Messi" → "Messi").
pub fn last_word(s: &str) -> String {
    s.split_whitespace().last().map(str::to_string).unwrap_or_default()
}

/// URL slug to display name ("borussia-dortmund" → "Borussia Dortmund").
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut cs = w.chars();
            match cs.next() {
                Some(c) => c.to_uppercase().chain(cs.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A file-system safe stem. Falls back to `fallback` when nothing is left.
pub fn file_stem(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

/// Euro amounts as shown on the site.
///
/// German: `"1,50 Mio. €"`, `"500 Tsd. €"`, `"1,2 Mrd. €"`; a number without a
/// unit counts as 0. English: `"€1.50m"`, `"€500k"`, `"€1.2bn"`.
/// `ablösefrei`, `free transfer` and `-` are 0. Anything else is `None`.
pub fn market_value(s: &str) -> Option<i64> {
    let s = normalize_ws(s);
    if s.is_empty() {
        return None;
    }
    let lower = s.to_lowercase();
    if s == "-" || lower == "ablösefrei" || lower == "free transfer" {
        return Some(0);
    }

    if let Some(rest) = s.strip_prefix('€') {
        let rest = rest.trim();
        let (num, mult) = if let Some(n) = rest.strip_suffix("bn") {
            (n, 1e9)
        } else if let Some(n) = rest.strip_suffix('m') {
            (n, 1e6)
        } else if let Some(n) = rest.strip_suffix("Th.") {
            (n, 1e3)
        } else if let Some(n) = rest.strip_suffix('k') {
            (n, 1e3)
        } else {
            (rest, 1.0)
        };
        let base: f64 = num.trim().replace(',', "").parse().ok()?;
        return Some((base * mult).round() as i64);
    }

    let mut tokens = s.split(' ');
    let base = tokens.next()?.replace('-', "0").replace('.', "").replace(',', ".");
    let base: f64 = base.parse().ok()?;
    let mult = match tokens.next() {
        Some("Mrd.") => 1e9,
        Some("Mio.") => 1e6,
        Some("Tsd.") => 1e3,
        Some("€") => 1.0,
        _ => 0.0,
    };
    Some((base * mult).round() as i64)
}

/// A transfer fee cell split into amount and flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fee {
    pub amount: Option<i64>,
    pub loan_end: bool,
    pub loan: bool,
    pub unknown: bool,
}

pub fn transfer_fee(s: &str) -> Fee {
    let s = normalize_ws(s);
    let lower = s.to_lowercase();
    let loan_end = s.contains("Leih-Ende") || lower.contains("end of loan");
    let loan = s.contains("Leihe") || s.contains("Leihgeb") || lower.contains("loan fee") || lower == "loan transfer";
    let unknown = s.contains('?');

    let cleaned = s
        .replace("Leih-Ende", "0")
        .replace("Leihe", "0")
        .replace("Leihgebühr:", "")
        .replace("End of loan", "0")
        .replace("Loan fee:", "")
        .replace("loan transfer", "0")
        .replace('?', "0");

    Fee { amount: market_value(&cleaned), loan_end, loan, unknown }
}

/// `"3:1"` → (3, 1). Unplayed `"-:-"` or times like `"15:30"` in the
/// result slot are the caller's concern; this only splits and parses.
pub fn score(s: &str) -> Option<(i64, i64)> {
    let first = s.split_whitespace().next()?;
    let (h, a) = first.split_once(':')?;
    Some((h.trim().parse().ok()?, a.trim().parse().ok()?))
}

/// `"2:1 n.V."` → ("2:1", Some("n.V.")).
pub fn split_result(s: &str) -> (String, Option<String>) {
    let s = normalize_ws(s);
    match s.split_once(' ') {
        Some((r, p)) => (s!(r), Some(s!(p))),
        None => (s, None),
    }
}

/// Count-like cells: `"1.234"`, `"3.421'"`, `"-"`. Placeholders and anything
/// unparsable count as 0.
pub fn count(s: &str) -> i64 {
    int_or_null(s).unwrap_or(0)
}

/// Same cleaning as `count`, but `None` instead of 0.
pub fn int_or_null(s: &str) -> Option<i64> {
    let cleaned: String = normalize_ws(s)
        .chars()
        .filter(|c| !matches!(c, '.' | '\'' | '′' | ' '))
        .collect();
    cleaned.parse().ok()
}

/// `"27,1"`, `"67,4 %"`, `"1,85 m"` → float. `"k. A."`, `"-"` → None.
pub fn german_float(s: &str) -> Option<f64> {
    let s = normalize_ws(s);
    let num: String = s
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-' | '+'))
        .collect();
    let num = if num.contains(',') { num.replace('.', "").replace(',', ".") } else { num };
    num.parse().ok()
}

// "%y" before "%Y": "%Y" also accepts "04" as year 4.
const DAYFIRST: &[&str] = &["%d.%m.%y", "%d.%m.%Y", "%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d", "%b %d, %Y"];
const MONTHFIRST: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%b %d, %Y", "%Y-%m-%d", "%d.%m.%y", "%d.%m.%Y"];

/// Day-first date; a trailing `" (33)"` age is ignored.
pub fn date(s: &str) -> Option<NaiveDate> {
    date_with(s, true)
}

/// English pages print numeric dates month-first.
pub fn date_with(s: &str, dayfirst: bool) -> Option<NaiveDate> {
    let s = s.replace('†', "");
    let s = normalize_ws(s.split('(').next().unwrap_or(""));
    if s.is_empty() || s == "-" {
        return None;
    }
    let formats = if dayfirst { DAYFIRST } else { MONTHFIRST };
    formats.iter().find_map(|f| NaiveDate::parse_from_str(&s, f).ok())
}

/// Number in parentheses, e.g. the age in `"24.06.1987 (33)"`.
pub fn in_parens(s: &str) -> Option<i64> {
    let (_, rest) = s.split_once('(')?;
    let (inner, _) = rest.split_once(')')?;
    inner.trim().parse().ok()
}

/// Leading number: `"14 Tage"`, `"14 days"`.
pub fn days(s: &str) -> Option<i64> {
    let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// `"(1.)"`, `"1."` → 1.
pub fn rank(s: &str) -> Option<i64> {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Season start year. `"98/99"` → 1998 and `"19/20"` → 2019 when
/// `current_yy` (this year's last two digits) is 20. Four-digit years pass.
pub fn season_year(s: &str, current_yy: i64) -> Option<i64> {
    let first = s.trim().split('/').next()?.trim();
    let n: i64 = first.parse().ok()?;
    match first.len() {
        4 => Some(n),
        1 | 2 if n > current_yy => Some(1900 + n),
        1 | 2 => Some(2000 + n),
        _ => None,
    }
}

/// Decode `\xHH`, `\uHHHH` and backslash-quoted characters as they appear in
/// inline chart scripts. Unknown escapes stay as they are.
pub fn decode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('x') => {
                chars.next();
                let hex: String = chars.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => { out.push_str("\\x"); out.push_str(&hex); }
                }
            }
            Some('u') => {
                chars.next();
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => { out.push_str("\\u"); out.push_str(&hex); }
                }
            }
            Some(q @ ('\'' | '"' | '/' | '\\')) => { chars.next(); out.push(q); }
            _ => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn market_values_german() {
        assert_eq!(market_value("1,50 Mio. €"), Some(1_500_000));
        assert_eq!(market_value("500 Tsd. €"), Some(500_000));
        assert_eq!(market_value("1,2 Mrd. €"), Some(1_200_000_000));
        assert_eq!(market_value("1,15 Mio. €"), Some(1_150_000));
        assert_eq!(market_value("ablösefrei"), Some(0));
        assert_eq!(market_value("-"), Some(0));
        assert_eq!(market_value("0"), Some(0));
        assert_eq!(market_value(""), None);
        assert_eq!(market_value("k. A."), None);
    }

    #[test]
    fn market_values_english() {
        assert_eq!(market_value("€1.50m"), Some(1_500_000));
        assert_eq!(market_value("€500k"), Some(500_000));
        assert_eq!(market_value("€500Th."), Some(500_000));
        assert_eq!(market_value("€1.20bn"), Some(1_200_000_000));
        assert_eq!(market_value("free transfer"), Some(0));
    }

    #[test]
    fn transfer_fees_and_flags() {
        let f = transfer_fee("Leih-Ende");
        assert_eq!(f, Fee { amount: Some(0), loan_end: true, loan: false, unknown: false });

        let f = transfer_fee("Leihe");
        assert!(f.loan && !f.loan_end);
        assert_eq!(f.amount, Some(0));

        let f = transfer_fee("Leihgebühr:1,00 Mio. €");
        assert!(f.loan);
        assert_eq!(f.amount, Some(1_000_000));

        let f = transfer_fee("?");
        assert!(f.unknown);
        assert_eq!(f.amount, Some(0));

        assert_eq!(transfer_fee("37,00 Mio. €").amount, Some(37_000_000));
        assert_eq!(transfer_fee("ablösefrei").amount, Some(0));
    }

    #[test]
    fn scores_and_periods() {
        assert_eq!(score("3:1"), Some((3, 1)));
        assert_eq!(score("2:1 n.V."), Some((2, 1)));
        assert_eq!(score("-:-"), None);
        assert_eq!(split_result("4:5 i.E."), (s!("4:5"), Some(s!("i.E."))));
        assert_eq!(split_result("1:0"), (s!("1:0"), None));
    }

    #[test]
    fn counts_and_floats() {
        assert_eq!(count("1.234"), 1234);
        assert_eq!(count("3.421'"), 3421);
        assert_eq!(count("-"), 0);
        assert_eq!(count(""), 0);
        assert_eq!(int_or_null("-"), None);
        assert_eq!(german_float("27,1"), Some(27.1));
        assert_eq!(german_float("67,4 %"), Some(67.4));
        assert_eq!(german_float("1,85 m"), Some(1.85));
        assert_eq!(german_float("k. A."), None);
        assert_eq!(german_float("-"), None);
    }

    #[test]
    fn dates() {
        assert_eq!(date("24.06.1987"), Some(d(1987, 6, 24)));
        assert_eq!(date("24.06.1987 (33)"), Some(d(1987, 6, 24)));
        assert_eq!(date("01.07.04"), Some(d(2004, 7, 1)));
        assert_eq!(date("Jun 24, 1987"), Some(d(1987, 6, 24)));
        assert_eq!(date("-"), None);
        assert_eq!(date_with("6/24/87", false), Some(d(1987, 6, 24)));
        assert_eq!(date_with("24.06.1987", false), Some(d(1987, 6, 24)));
    }

    #[test]
    fn small_numbers() {
        assert_eq!(in_parens("24.06.1987 (33)"), Some(33));
        assert_eq!(in_parens("24.06.1987"), None);
        assert_eq!(days("14 Tage"), Some(14));
        assert_eq!(days("113 days"), Some(113));
        assert_eq!(rank("(1.)"), Some(1));
        assert_eq!(rank("12."), Some(12));
        assert_eq!(season_year("98/99", 20), Some(1998));
        assert_eq!(season_year("19/20", 20), Some(2019));
        assert_eq!(season_year("2019", 20), Some(2019));
    }

    #[test]
    fn names_and_stems() {
        assert_eq!(last_word("Lionel Messi"), "Messi");
        assert_eq!(last_word(""), "");
        assert_eq!(title_case_slug("borussia-dortmund"), "Borussia Dortmund");
        assert_eq!(file_stem("FC Bayern München", "club"), "FC_Bayern_München");
        assert_eq!(file_stem("///", "club"), "club");
    }

    #[test]
    fn escapes() {
        assert_eq!(decode_escapes(r"Bayern\x20München"), "Bayern München");
        assert_eq!(decode_escapes(r"\'y\':1"), "'y':1");
        assert_eq!(decode_escapes(r"a\qb"), r"a\qb");
    }
}
