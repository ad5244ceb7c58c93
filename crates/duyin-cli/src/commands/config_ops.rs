use std::fs;
use std::path::Path;
use std::process;

use duyin_core::settings::{self, Settings};
use tracing::debug;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Settings from `file`, or the embedded defaults.
pub fn load_settings(file: Option<&str>) -> Settings {
    match file {
        Some(file) => {
            let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
            let mut s = die!(settings::parse_settings_toml(&content), "Error in {file}: {}");
            if let Some(dir) = Path::new(file).parent() {
                s.dictionary.resolve_relative_to(dir);
            }
            debug!(file, overrides = ?s.dictionary.overrides, "loaded settings");
            s
        }
        None => die!(
            settings::parse_settings_toml(settings::DEFAULT_SETTINGS_TOML),
            "Error in embedded settings: {}"
        ),
    }
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: engine.strategy={}, engine.compare_with={}, report.max_rows={}",
        s.engine.strategy, s.engine.compare_with, s.report.max_rows
    );
}
