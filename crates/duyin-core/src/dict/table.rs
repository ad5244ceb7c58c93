use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{DictError, PhoneticDictionary};
use crate::reading::{parse_syllables, Syllable};
use crate::unicode::{is_ideograph, is_ideograph_text};

#[derive(Deserialize)]
struct TableConfig {
    #[serde(default)]
    chars: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    phrases: BTreeMap<String, Vec<String>>,
}

/// Dictionary backed by explicit in-memory tables.
///
/// TOML layout:
///
/// ```toml
/// [chars]
/// "行" = ["hang2", "xing2"]
///
/// [phrases]
/// "银行" = ["yin2", "hang2"]
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableDictionary {
    chars: HashMap<char, Vec<Syllable>>,
    phrases: HashMap<String, Vec<Syllable>>,
}

impl TableDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a TOML file.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let content = fs::read_to_string(path)?;
        parse_table_toml(&content)
    }

    /// Append readings for `c`. Earlier readings stay first.
    pub fn insert_char(&mut self, c: char, readings: Vec<Syllable>) {
        let entry = self.chars.entry(c).or_default();
        for r in readings {
            if !entry.contains(&r) {
                entry.push(r);
            }
        }
    }

    /// Set the per-position readings of a phrase, replacing any previous entry.
    pub fn insert_phrase(&mut self, word: &str, readings: Vec<Syllable>) {
        self.phrases.insert(word.to_string(), readings);
    }

    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }
}

impl PhoneticDictionary for TableDictionary {
    fn lookup_char(&self, c: char) -> Vec<Syllable> {
        self.chars.get(&c).cloned().unwrap_or_default()
    }

    fn lookup_phrase(&self, word: &str) -> Option<Vec<Syllable>> {
        self.phrases.get(word).cloned()
    }
}

/// Parse a `[chars]` / `[phrases]` TOML table.
pub fn parse_table_toml(toml_str: &str) -> Result<TableDictionary, DictError> {
    let config: TableConfig =
        toml::from_str(toml_str).map_err(|e| DictError::Parse(e.to_string()))?;

    let mut dict = TableDictionary::new();

    for (key, values) in &config.chars {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(invalid(key, "char key must be exactly one character"));
        };
        if !is_ideograph(c) {
            return Err(invalid(key, "char key must be an ideograph"));
        }
        if values.is_empty() {
            return Err(invalid(key, "at least one reading is required"));
        }
        let readings = parse_syllables(values).map_err(|e| invalid(key, &e.to_string()))?;
        dict.insert_char(c, readings);
    }

    for (key, values) in &config.phrases {
        if !is_ideograph_text(key) || key.chars().count() < 2 {
            return Err(invalid(key, "phrase key must be two or more ideographs"));
        }
        if values.len() != key.chars().count() {
            return Err(invalid(key, "phrase needs exactly one reading per character"));
        }
        let readings = parse_syllables(values).map_err(|e| invalid(key, &e.to_string()))?;
        dict.insert_phrase(key, readings);
    }

    Ok(dict)
}

fn invalid(key: &str, reason: &str) -> DictError {
    DictError::InvalidEntry {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
