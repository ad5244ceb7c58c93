//! Settings loaded from TOML.
//!
//! - Default values are embedded via `include_str!("default_settings.toml")`
//! - `Settings::default()` parses the embedded file (checked by `build.rs`)
//! - Custom files go through `parse_settings_toml`, which validates every field

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::strategy::Strategy;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub engine: EngineSettings,
    pub input: InputSettings,
    pub report: ReportSettings,
    pub dictionary: DictionarySettings,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    pub strategy: Strategy,
    pub compare_with: Strategy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub placeholders: Vec<String>,
    pub trim: bool,
}

impl InputSettings {
    /// The token as it enters the engine, or `None` if it is blank or a
    /// placeholder.
    pub fn keep<'t>(&self, token: &'t str) -> Option<&'t str> {
        let t = if self.trim { token.trim() } else { token };
        if t.trim().is_empty() || self.placeholders.iter().any(|p| p == t.trim()) {
            return None;
        }
        Some(t)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    pub max_rows: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionarySettings {
    pub use_default_phrases: bool,
    #[serde(default)]
    pub overrides: Option<PathBuf>,
}

impl DictionarySettings {
    /// Anchor a relative `overrides` path at `dir`, the directory of the
    /// settings file it was read from.
    pub fn resolve_relative_to(&mut self, dir: &Path) {
        if let Some(path) = &mut self.overrides {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(report.max_rows);

    for p in &s.input.placeholders {
        if p.trim().is_empty() {
            return Err(SettingsError::InvalidValue {
                field: "input.placeholders".to_string(),
                reason: "placeholders must be non-blank".to_string(),
            });
        }
    }

    if let Some(path) = &s.dictionary.overrides {
        if path.as_os_str().is_empty() {
            return Err(SettingsError::InvalidValue {
                field: "dictionary.overrides".to_string(),
                reason: "path must not be empty".to_string(),
            });
        }
    }

    Ok(())
}
