// src/config/consts.rs

// Net config
pub const HOST: &str = "www.transfermarkt";
pub const EMBLEM_URL: &str = "https://tmssl.akamaized.net//images/wappen/big";
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";
pub const TIMEOUT_SECS: u64 = 30;

// Scrape
pub const REQUEST_PAUSE_MS: u64 = 2_000; // be polite
pub const JITTER_MS: u64 = 500; // extra 0..500 ms
pub const MAX_GAMEWEEKS: u32 = 38;
pub const DEFAULT_COLORS: [&str; 2] = ["w", "k"];

// Export
pub const DEFAULT_OUT_DIR: &str = ".";
pub const PLACEMENTS_SUBDIR: &str = "league_placements";
pub const GAMEWEEK_SUBDIR: &str = "gameweek_placements";
pub const SQUAD_SUBDIR: &str = "Kader-Leistungsdaten";
