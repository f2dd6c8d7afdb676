// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::{GAMEWEEK_SUBDIR, PLACEMENTS_SUBDIR, SQUAD_SUBDIR};
use crate::config::options::ExportOptions;
use crate::core::sanitize::file_stem;
use crate::csv::{parse_rows, write_dataset};
use crate::data::{DataSet, Value};
use crate::error::{Result, ScrapeError};

/// Where a table lands below the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub subdir: String,
    pub stem: String,
}

impl Target {
    pub fn new(subdir: &str, stem: &str) -> Self {
        Self { subdir: s!(subdir), stem: file_stem(stem, "table") }
    }

    /// `league_placements/{club}_league_placements`
    pub fn league_placements(club: &str) -> Self {
        Self::new(PLACEMENTS_SUBDIR, &format!("{club}_league_placements"))
    }

    /// `gameweek_placements/{club}_gameweek_placements`
    pub fn gameweek_placements(club: &str) -> Self {
        Self::new(GAMEWEEK_SUBDIR, &format!("{club}_gameweek_placements"))
    }

    /// `Kader-Leistungsdaten/{club}_Kader_{season}`
    pub fn roster(club: &str, season: u16) -> Self {
        Self::new(SQUAD_SUBDIR, &format!("{club}_Kader_{season}"))
    }

    /// `Kader-Leistungsdaten/{club}_Leistungsdaten_{season}`
    pub fn performance(club: &str, season: u16) -> Self {
        Self::new(SQUAD_SUBDIR, &format!("{club}_Leistungsdaten_{season}"))
    }

    pub fn path(&self, export: &ExportOptions) -> PathBuf {
        export.path_for(&self.subdir, &self.stem)
    }
}

/// Write one table to `<out_dir>/<subdir>/<stem>.<ext>`, creating directories
/// as needed. Returns the path written to.
pub fn save_dataset(ds: &DataSet, export: &ExportOptions, target: &Target) -> Result<PathBuf> {
    let path = target.path(export);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let file = File::create(&path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    write_dataset(&mut out, ds, export.include_headers, export.format.delim())?;
    out.flush()?;

    logf!("saved {} rows to {}", ds.len(), path.display());
    Ok(path)
}

/// Read a table written by `save_dataset` (with headers) back as text cells.
/// Empty cells come back as Null.
pub fn load_dataset(path: &Path, sep: char) -> Result<DataSet> {
    let text = fs::read_to_string(path)?;
    let mut rows = parse_rows(&text, sep).into_iter();
    let headers = rows
        .next()
        .ok_or_else(|| ScrapeError::Shape(format!("{} is empty", path.display())))?;

    let mut ds = DataSet::new(headers);
    for r in rows {
        ds.push_row(r.into_iter().map(Value::text_or_null).collect())?;
    }
    Ok(ds)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
