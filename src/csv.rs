// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::data::DataSet;

/* ---------------- Reading ---------------- */

#[derive(Default)]
struct RowReader {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    field: String,
    quoted: bool,
    // the current field opened a quote at some point
    was_quoted: bool,
}

impl RowReader {
    fn end_field(&mut self) {
        self.row.push(take(&mut self.field));
        self.was_quoted = false;
    }

    fn end_row(&mut self) {
        let quoted = self.was_quoted;
        self.end_field();
        let blank = self.row.len() == 1 && self.row[0].is_empty() && !quoted;
        if blank {
            self.row.clear();
        } else {
            self.rows.push(take(&mut self.row));
        }
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        // unterminated quotes still flush
        if !self.field.is_empty() || !self.row.is_empty() || self.was_quoted {
            self.end_row();
        }
        self.rows
    }
}

/// Split CSV/TSV text into rows of cells. Handles quoted fields, doubled
/// quotes and CRLF; blank lines are dropped, a line holding only `""` is a
/// row with one empty cell.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rd = RowReader::default();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if rd.quoted {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    rd.field.push('"');
                }
                '"' => rd.quoted = false,
                _ => rd.field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => {
                rd.quoted = true;
                rd.was_quoted = true;
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                rd.end_row();
            }
            '\n' => rd.end_row(),
            c if c == sep => rd.end_field(),
            c => rd.field.push(c),
        }
    }

    rd.finish()
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.chars().any(|c| c == sep || matches!(c, '"' | '\n' | '\r'))
}

/// Write one row, quoting only the cells that need it. A row of one empty
/// cell is written as `""` so it does not read back as a blank line.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    if let [only] = row {
        if only.is_empty() {
            return writeln!(w, "\"\"");
        }
    }
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{sep}")?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// Write a whole table. Cells render through `Value`'s Display.
pub fn write_dataset<W: Write>(mut w: W, ds: &DataSet, include_headers: bool, sep: char) -> io::Result<()> {
    if include_headers {
        write_row(&mut w, &ds.headers, sep)?;
    }
    for r in ds.to_string_rows() {
        write_row(&mut w, &r, sep)?;
    }
    Ok(())
}

pub fn dataset_to_string(ds: &DataSet, include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_dataset(&mut buf, ds, include_headers, sep);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
