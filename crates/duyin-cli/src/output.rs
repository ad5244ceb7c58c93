//! Result sinks: CSV rows, JSON documents and aligned text tables.

use std::io::{self, Write};

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use duyin_core::compare::Comparison;
use duyin_core::resolver::Resolution;
use duyin_core::validate::ValidationReport;
use duyin_core::{Assignment, Run, RunPair};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Csv,
    Json,
    Text,
}

/// CSV writer with the header written up front, so an empty result
/// still yields a header line.
fn csv_writer<W: Write>(w: W, headers: &[&str]) -> Result<csv::Writer<W>, OutputError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(w);
    wtr.write_record(headers)?;
    Ok(wtr)
}

const RUN_HEADERS: [&str; 7] = [
    "index",
    "word",
    "label",
    "reading",
    "tier",
    "collision_count",
    "shared_with",
];

/// One CSV line per assignment.
#[derive(Serialize)]
struct CsvRow<'a> {
    index: usize,
    word: &'a str,
    label: &'a str,
    reading: String,
    tier: &'static str,
    collision_count: usize,
    /// Words sharing the first-tested reading, space separated.
    shared_with: String,
}

impl<'a> CsvRow<'a> {
    fn new(a: &'a Assignment, run: &Run) -> Self {
        Self {
            index: a.index,
            word: &a.word,
            label: &a.label,
            reading: a.reading.as_ref().map(ToString::to_string).unwrap_or_default(),
            tier: a.tier.name(),
            collision_count: a.collision_count,
            shared_with: shared_words(a, run).join(" "),
        }
    }
}

fn shared_words<'r>(a: &Assignment, run: &'r Run) -> Vec<&'r str> {
    a.shared_with
        .iter()
        .filter_map(|&i| run.assignments.get(i))
        .map(|other| other.word.as_str())
        .collect()
}

pub fn write_run_csv<W: Write>(w: W, run: &Run) -> Result<(), OutputError> {
    let mut wtr = csv_writer(w, &RUN_HEADERS)?;
    for a in &run.assignments {
        wtr.serialize(CsvRow::new(a, run))?;
    }
    wtr.flush()?;
    Ok(())
}

const DIFF_HEADERS: [&str; 8] = [
    "index",
    "word",
    "left_label",
    "right_label",
    "left_tier",
    "right_tier",
    "left_collisions",
    "right_collisions",
];

#[derive(Serialize)]
struct DiffRow<'a> {
    index: usize,
    word: &'a str,
    left_label: &'a str,
    right_label: &'a str,
    left_tier: &'static str,
    right_tier: &'static str,
    left_collisions: usize,
    right_collisions: usize,
}

pub fn write_comparison_csv<W: Write>(w: W, cmp: &Comparison) -> Result<(), OutputError> {
    let mut wtr = csv_writer(w, &DIFF_HEADERS)?;
    for d in &cmp.differences {
        wtr.serialize(DiffRow {
            index: d.index,
            word: &d.word,
            left_label: &d.left_label,
            right_label: &d.right_label,
            left_tier: d.left_tier.name(),
            right_tier: d.right_tier.name(),
            left_collisions: d.left_collisions,
            right_collisions: d.right_collisions,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

const POLYPHONE_HEADERS: [&str; 6] = [
    "ch",
    "readings",
    "votes",
    "chosen",
    "changed",
    "supporting_words",
];

#[derive(Serialize)]
struct PolyphoneRow {
    ch: String,
    readings: String,
    votes: String,
    chosen: String,
    changed: bool,
    supporting_words: String,
}

pub fn write_polyphones_csv<W: Write>(w: W, report: &[Resolution]) -> Result<(), OutputError> {
    let mut wtr = csv_writer(w, &POLYPHONE_HEADERS)?;
    for r in report {
        wtr.serialize(PolyphoneRow {
            ch: r.ch.to_string(),
            readings: join(&r.readings),
            votes: join(&r.votes),
            chosen: r.chosen.to_string(),
            changed: r.differs_from_default(),
            supporting_words: r.supporting_words.join(" "),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(mut w: W, value: &T) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut w, value)?;
    writeln!(w)?;
    Ok(())
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Left-align `s` to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w < width {
        format!("{}{}", s, " ".repeat(width - w))
    } else {
        s.to_string()
    }
}

/// Aligned table with a header line; at most `max_rows` body rows.
pub fn format_table(headers: &[&str], rows: &[Vec<String>], max_rows: usize) -> String {
    let shown = &rows[..rows.len().min(max_rows)];
    let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in shown {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| pad(c, w))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.to_vec());
    for row in shown {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    if rows.len() > shown.len() {
        out.push_str(&format!("... {} more rows\n", rows.len() - shown.len()));
    }
    out
}

pub fn format_run_text(run: &Run, max_rows: usize) -> String {
    let mut out = format!(
        "=== {} ({} words, {} collection members, {} distinct) ===\n",
        run.strategy,
        run.assignments.len(),
        run.collection.members,
        run.collection.distinct,
    );

    let rows: Vec<Vec<String>> = run
        .assignments
        .iter()
        .map(|a| {
            vec![
                a.index.to_string(),
                a.word.clone(),
                a.label.clone(),
                reading_cell(a),
                a.tier.name().to_string(),
                a.collision_count.to_string(),
                shared_words(a, run).join(" "),
            ]
        })
        .collect();
    out.push_str(&format_table(
        &["#", "word", "label", "reading", "tier", "collisions", "shared with"],
        &rows,
        max_rows,
    ));

    let stats = &run.stats;
    out.push_str("\n=== Tiers ===\n");
    for (tier, n) in stats.tiers.iter().filter(|(_, n)| *n > 0) {
        out.push_str(&format!("  {:<12} {}\n", tier.name(), n));
    }
    out.push_str(&format!(
        "\n=== Tones ===\n  1:{} 2:{} 3:{} 4:{} neutral:{}\n",
        stats.tones.first, stats.tones.second, stats.tones.third, stats.tones.fourth, stats.tones.neutral,
    ));

    out.push_str("\n=== Reading frequency ===\n");
    let freq: Vec<Vec<String>> = stats
        .frequency
        .iter()
        .map(|f| vec![f.reading.to_string(), f.count.to_string()])
        .collect();
    out.push_str(&format_table(&["reading", "words"], &freq, max_rows));
    out.push_str(&format!(
        "Duplicated readings: {} in collection, {} after labeling\n",
        run.collection.duplicated, stats.duplicated,
    ));

    out.push('\n');
    out.push_str(&format_validation_text(&run.validation));
    out
}

/// Label reading, or the mixed-word hint in parentheses.
fn reading_cell(a: &Assignment) -> String {
    match (&a.reading, &a.hint) {
        (Some(r), _) => r.to_string(),
        (None, Some(h)) => format!("({h})"),
        (None, None) => String::new(),
    }
}

pub fn format_validation_text(report: &ValidationReport) -> String {
    if report.passed() {
        return format!(
            "Validation passed: {} labels unique ({} excluded)\n",
            report.checked, report.skipped
        );
    }
    let mut out = format!(
        "Validation FAILED: {} collision groups over {} labels\n",
        report.collisions.len(),
        report.checked
    );
    for g in &report.collisions {
        let words: Vec<String> = g.words.iter().map(|(i, w)| format!("{w}(#{i})")).collect();
        out.push_str(&format!("  {}: {}\n", g.key, words.join(", ")));
    }
    out
}

pub fn format_comparison_text(pair: &RunPair, max_rows: usize) -> String {
    let cmp = &pair.comparison;
    let mut out = format!(
        "=== {} vs {}: {} same, {} different ({:.1}% agreement) ===\n",
        pair.left.strategy,
        pair.right.strategy,
        cmp.same,
        cmp.different,
        cmp.agreement() * 100.0,
    );
    let rows: Vec<Vec<String>> = cmp
        .differences
        .iter()
        .map(|d| {
            vec![
                d.index.to_string(),
                d.word.clone(),
                format!("{} ({})", d.left_label, d.left_tier.name()),
                format!("{} ({})", d.right_label, d.right_tier.name()),
            ]
        })
        .collect();
    let left = pair.left.strategy.to_string();
    let right = pair.right.strategy.to_string();
    out.push_str(&format_table(&["#", "word", &left, &right], &rows, max_rows));

    out.push_str(&format!("\n{}: ", pair.left.strategy));
    out.push_str(&format_validation_text(&pair.left.validation));
    out.push_str(&format!("{}: ", pair.right.strategy));
    out.push_str(&format_validation_text(&pair.right.validation));
    out
}

pub fn format_polyphones_text(report: &[Resolution]) -> String {
    if report.is_empty() {
        return "No polyphonic characters.\n".to_string();
    }
    let mut out = format!("=== Polyphonic characters ({}) ===\n", report.len());
    for r in report {
        let votes: Vec<String> = r
            .readings
            .iter()
            .zip(&r.votes)
            .map(|(s, n)| format!("{s}={n}"))
            .collect();
        let marker = if r.differs_from_default() { "  (context)" } else { "" };
        out.push_str(&format!(
            "  {} -> {}  [{}]{}\n",
            r.ch,
            r.chosen,
            votes.join(" "),
            marker
        ));
        if !r.supporting_words.is_empty() {
            out.push_str(&format!("      from: {}\n", r.supporting_words.join(" ")));
        }
    }
    out
}
