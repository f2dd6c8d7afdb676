// src/core/net.rs
// Page fetching. One blocking GET per call, static browser User-Agent.

use std::cell::RefCell;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use rand::Rng;
use reqwest::blocking::Client;

use crate::config::consts::{TIMEOUT_SECS, USER_AGENT};
use crate::config::ScrapeOptions;
use crate::error::{Result, ScrapeError};

/// Anything that can hand back a page for a URL.
pub trait Fetch {
    fn get_text(&self, url: &str) -> Result<String>;
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Live fetcher over `reqwest::blocking`.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_user_agent(USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .gzip(true)
            .build()
            .map_err(|source| ScrapeError::Http { url: s!(), source })?;
        Ok(Self { client })
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response> {
        logf!("scraping {url}");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| ScrapeError::Http { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { url: s!(url), status: status.as_u16() });
        }
        Ok(resp)
    }
}

impl Fetch for HttpFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        self.send(url)?
            .text()
            .map_err(|source| ScrapeError::Http { url: s!(url), source })
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.send(url)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|source| ScrapeError::Http { url: s!(url), source })
    }
}

/// Serves saved pages from memory. Used to re-parse captured HTML offline.
/// Remembers every URL asked for, in order.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Vec<u8>>,
    requested: RefCell<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self { Self::default() }

    pub fn with_page(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: &str, body: impl Into<Vec<u8>>) {
        self.pages.insert(s!(url), body.into());
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }

    fn lookup(&self, url: &str) -> Result<&Vec<u8>> {
        self.requested.borrow_mut().push(s!(url));
        self.pages.get(url).ok_or_else(|| ScrapeError::Missing(s!(url)))
    }
}

impl Fetch for StaticFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        Ok(String::from_utf8_lossy(self.lookup(url)?).into_owned())
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        Ok(self.lookup(url)?.clone())
    }
}

/// Random extra pause in 0..jitter.
pub fn jitter_for(opts: &ScrapeOptions) -> Duration {
    let jitter_ms = opts.jitter.as_millis() as u64;
    if jitter_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
}

/// Sleep between two requests of one loop scraper.
pub fn pause(opts: &ScrapeOptions) {
    let d = opts.delay + jitter_for(opts);
    if !d.is_zero() {
        logd!("pausing {} ms before next request", d.as_millis());
        thread::sleep(d); // be polite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_fetcher_serves_and_records() {
        let f = StaticFetcher::new().with_page("https://a/b", "<html></html>");
        assert_eq!(f.get_text("https://a/b").unwrap(), "<html></html>");
        assert!(matches!(f.get_text("https://a/c"), Err(ScrapeError::Missing(_))));
        assert_eq!(f.requested(), vec!["https://a/b", "https://a/c"]);
    }

    #[test]
    fn jitter_stays_below_bound() {
        let opts = ScrapeOptions::default();
        for _ in 0..100 {
            assert!(jitter_for(&opts) < opts.jitter);
        }
        assert_eq!(jitter_for(&ScrapeOptions::no_delay()), Duration::ZERO);
    }

    #[test]
    fn http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
    }
}
