// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::consts::*;

/// Which national site to read. Column texts and date formats differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Domain {
    #[default]
    De,
    Com,
    CoUk,
}

impl Domain {
    pub fn tld(&self) -> &'static str {
        match self {
            Domain::De => "de",
            Domain::Com => "com",
            Domain::CoUk => "co.uk",
        }
    }

    /// `https://www.transfermarkt.<tld>`
    pub fn base_url(&self) -> String {
        join!("https://", HOST, ".", self.tld())
    }

    pub fn is_german(&self) -> bool { matches!(self, Domain::De) }

    /// German pages print dates day-first; the English ones month-first.
    pub fn dayfirst(&self) -> bool { self.is_german() }

    /// Guess the domain from a full page URL. Anything unknown is `De`.
    pub fn from_url(url: &str) -> Domain {
        if url.contains(".transfermarkt.co.uk") {
            Domain::CoUk
        } else if url.contains(".transfermarkt.com") {
            Domain::Com
        } else {
            Domain::De
        }
    }
}

impl FromStr for Domain {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "de" => Ok(Domain::De),
            "com" => Ok(Domain::Com),
            "co.uk" | "uk" => Ok(Domain::CoUk),
            other => Err(format!("Unknown domain: {other} (expected de, com or co.uk)")),
        }
    }
}

/// Competition overview regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Europa,
    Asien,
    Afrika,
    Amerika,
    EuropaJugend,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Europa,
        Region::Asien,
        Region::Afrika,
        Region::Amerika,
        Region::EuropaJugend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Europa => "europa",
            Region::Asien => "asien",
            Region::Afrika => "afrika",
            Region::Amerika => "amerika",
            Region::EuropaJugend => "europaJugend",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Region {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown region: {s} (expected one of europa, asien, afrika, amerika, europaJugend)"))
    }
}

/// Knobs for scrapers that issue more than one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub domain: Domain,
    /// Base pause between two requests of one loop.
    pub delay: Duration,
    /// Upper bound of the extra per-request pause.
    pub jitter: Duration,
    pub max_gameweeks: u32,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            domain: Domain::De,
            delay: Duration::from_millis(REQUEST_PAUSE_MS),
            jitter: Duration::from_millis(JITTER_MS),
            max_gameweeks: MAX_GAMEWEEKS,
        }
    }
}

impl ScrapeOptions {
    /// No pauses at all; for offline parsing of saved pages.
    pub fn no_delay() -> Self {
        Self { delay: Duration::ZERO, jitter: Duration::ZERO, ..Self::default() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

impl FromStr for ExportFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(format!("Unknown format: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/<subdir>/<stem>.<ext>`
    pub fn path_for(&self, subdir: &str, stem: &str) -> PathBuf {
        let mut p = self.out_dir.clone();
        if !subdir.is_empty() {
            p.push(subdir);
        }
        p.push(join!(stem, ".", self.format.ext()));
        p
    }
}
