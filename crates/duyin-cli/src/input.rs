//! Word-list ingestion: plain text (one token per line) or CSV cells.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use duyin_core::settings::InputSettings;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputOptions {
    pub csv: bool,
    /// Read CSV cells column by column instead of row by row.
    pub column_major: bool,
}

/// Read tokens from `path`, or stdin when `path` is `-`.
pub fn read_words(
    path: &str,
    opts: InputOptions,
    settings: &InputSettings,
) -> Result<Vec<String>, InputError> {
    let reader: Box<dyn Read> = if path == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(Path::new(path))?)
    };
    if opts.csv {
        parse_csv(reader, opts.column_major, settings)
    } else {
        parse_lines(BufReader::new(reader), settings)
    }
}

const BOM: char = '\u{FEFF}';

/// One token per line. A UTF-8 byte-order mark on the first line is
/// dropped, matching what the `csv` reader does.
pub fn parse_lines<R: BufRead>(reader: R, settings: &InputSettings) -> Result<Vec<String>, InputError> {
    let mut words = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = if i == 0 {
            line.strip_prefix(BOM).unwrap_or(&line)
        } else {
            &line
        };
        if let Some(w) = settings.keep(line) {
            words.push(w.to_string());
        }
    }
    Ok(words)
}

/// Every non-placeholder cell of a header-less CSV. Rows may have
/// different lengths.
pub fn parse_csv<R: Read>(
    reader: R,
    column_major: bool,
    settings: &InputSettings,
) -> Result<Vec<String>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let cells: Vec<&str> = if column_major {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..width)
            .flat_map(|col| rows.iter().filter_map(move |row| row.get(col)))
            .map(String::as_str)
            .collect()
    } else {
        rows.iter().flatten().map(String::as_str).collect()
    };

    Ok(cells
        .into_iter()
        .filter_map(|c| settings.keep(c))
        .map(str::to_string)
        .collect())
}
