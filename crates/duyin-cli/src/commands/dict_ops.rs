use std::process;

use duyin_core::settings::Settings;
use duyin_core::unicode::is_ideograph;
use duyin_core::LabelEngine;

use crate::input::{read_words, InputOptions};
use crate::output::format_polyphones_text;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Print the dictionary readings of one character, and its resolution
/// when a word list is given as context.
pub fn lookup(settings: &Settings, ch: &str, context: Option<&str>, input: InputOptions) {
    let mut chars = ch.chars();
    let c = match (chars.next(), chars.next()) {
        (Some(c), None) if is_ideograph(c) => c,
        _ => {
            eprintln!("Error: expected a single ideograph, got {ch:?}");
            process::exit(1);
        }
    };

    let engine = die!(
        LabelEngine::from_settings(&settings.dictionary),
        "Error loading dictionary: {}"
    );
    let readings = die!(engine.lookup(c), "Error: {}");

    let list: Vec<String> = readings.iter().map(ToString::to_string).collect();
    println!("{c}\t{}", list.join(" "));
    if readings.len() > 1 {
        println!("  polyphonic ({} readings, default {})", readings.len(), readings[0]);
    }

    let Some(path) = context else {
        return;
    };
    let words = die!(
        read_words(path, input, &settings.input),
        "Error reading {path}: {}"
    );
    let resolution = die!(engine.explain(&words, c), "Error: {}");
    print!("{}", format_polyphones_text(std::slice::from_ref(&resolution)));
}
