// src/progress.rs
/// Progress reporting for scrapers that loop over several page fetches
/// (gameweeks, national teams, positions, competition pages).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Called when one logical unit completes (e.g., a gameweek was scraped).
    fn item_done(&mut self, _id: u32) {}

    /// Called when one unit failed but the loop goes on.
    fn item_failed(&mut self, _id: u32, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Forwards everything to the log.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        logf!("{total} pages to scrape");
    }

    fn item_done(&mut self, id: u32) {
        self.done += 1;
        logd!("[{}/{}] done: {id}", self.done, self.total);
    }

    fn item_failed(&mut self, id: u32, err: &str) {
        self.done += 1;
        logw!("[{}/{}] failed: {id}: {err}", self.done, self.total);
    }

    fn finish(&mut self) {
        logf!("finished {} of {}", self.done, self.total);
    }
}

/// Test helper and simple collector: records every call.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub done: Vec<u32>,
    pub failed: Vec<u32>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn item_done(&mut self, id: u32) { self.done.push(id); }
    fn item_failed(&mut self, id: u32, _err: &str) { self.failed.push(id); }
    fn finish(&mut self) { self.finished = true; }
}
