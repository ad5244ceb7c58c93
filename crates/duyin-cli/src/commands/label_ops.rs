use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use tracing::info;

use duyin_core::settings::Settings;
use duyin_core::{LabelEngine, Run, RunPair, Strategy};

use crate::input::{read_words, InputOptions};
use crate::output::{
    format_comparison_text, format_polyphones_text, format_run_text, write_comparison_csv,
    write_json, write_polyphones_csv, write_run_csv, Format, OutputError,
};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Where words come from and where results go.
pub struct RunOptions<'a> {
    pub input: &'a str,
    pub input_opts: InputOptions,
    pub format: Format,
    pub output: Option<&'a str>,
    /// Exit with status 2 when labels are not unique.
    pub strict: bool,
}

fn engine(settings: &Settings) -> LabelEngine {
    die!(
        LabelEngine::from_settings(&settings.dictionary),
        "Error loading dictionary: {}"
    )
}

fn words(settings: &Settings, opts: &RunOptions) -> Vec<String> {
    let words = die!(
        read_words(opts.input, opts.input_opts, &settings.input),
        "Error reading {}: {}",
        opts.input
    );
    info!(words = words.len(), input = opts.input, "read word list");
    words
}

fn open_output(path: Option<&str>) -> Box<dyn Write> {
    match path {
        Some(p) => Box::new(BufWriter::new(die!(
            File::create(p),
            "Error creating {p}: {}"
        ))),
        None => Box::new(io::stdout().lock()),
    }
}

pub fn render_run<W: Write>(mut w: W, run: &Run, format: Format, max_rows: usize) -> Result<(), OutputError> {
    match format {
        Format::Csv => write_run_csv(w, run),
        Format::Json => write_json(w, run),
        Format::Text => {
            w.write_all(format_run_text(run, max_rows).as_bytes())?;
            w.flush()?;
            Ok(())
        }
    }
}

pub fn render_pair<W: Write>(
    mut w: W,
    pair: &RunPair,
    format: Format,
    max_rows: usize,
) -> Result<(), OutputError> {
    match format {
        Format::Csv => write_comparison_csv(w, &pair.comparison),
        Format::Json => write_json(w, pair),
        Format::Text => {
            w.write_all(format_comparison_text(pair, max_rows).as_bytes())?;
            w.flush()?;
            Ok(())
        }
    }
}

pub fn render_polyphones<W: Write>(mut w: W, run: &Run, format: Format) -> Result<(), OutputError> {
    match format {
        Format::Csv => write_polyphones_csv(w, &run.polyphones),
        Format::Json => write_json(w, &run.polyphones),
        Format::Text => {
            w.write_all(format_polyphones_text(&run.polyphones).as_bytes())?;
            w.flush()?;
            Ok(())
        }
    }
}

pub fn label(settings: &Settings, strategy: Option<Strategy>, opts: &RunOptions) {
    let strategy = strategy.unwrap_or(settings.engine.strategy);
    let words = words(settings, opts);
    let run = die!(engine(settings).run(&words, strategy), "Error: {}");

    die!(
        render_run(open_output(opts.output), &run, opts.format, settings.report.max_rows),
        "Error writing output: {}"
    );

    if opts.strict && !run.validation.passed() {
        eprintln!(
            "Error: {} collision groups remain under {}",
            run.validation.collisions.len(),
            strategy
        );
        process::exit(2);
    }
}

pub fn compare(
    settings: &Settings,
    left: Option<Strategy>,
    right: Option<Strategy>,
    opts: &RunOptions,
) {
    let left = left.unwrap_or(settings.engine.strategy);
    let right = right.unwrap_or(settings.engine.compare_with);
    let words = words(settings, opts);
    let pair = die!(
        engine(settings).run_pair(&words, left, right),
        "Error: {}"
    );

    die!(
        render_pair(open_output(opts.output), &pair, opts.format, settings.report.max_rows),
        "Error writing output: {}"
    );

    if opts.strict && !(pair.left.validation.passed() && pair.right.validation.passed()) {
        eprintln!("Error: labels are not unique under {left} and {right}");
        process::exit(2);
    }
}

pub fn polyphones(settings: &Settings, strategy: Option<Strategy>, opts: &RunOptions) {
    let strategy = strategy.unwrap_or(settings.engine.strategy);
    let words = words(settings, opts);
    let run = die!(engine(settings).run(&words, strategy), "Error: {}");
    die!(
        render_polyphones(open_output(opts.output), &run, opts.format),
        "Error writing output: {}"
    );
}
