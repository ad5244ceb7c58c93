//! Phonetic dictionaries.
//!
//! `PinyinDictionary` answers per-character lookups from the `pinyin`
//! crate's data and compound lookups from a phrase table.
//! `TableDictionary` holds explicit character and phrase readings parsed
//! from TOML. `LayeredDictionary` stacks several of them.

mod layered;
mod pinyin_dict;
mod table;

pub use layered::LayeredDictionary;
pub use pinyin_dict::{PinyinDictionary, DEFAULT_PHRASES_TOML};
pub use table::{parse_table_toml, TableDictionary};

use std::collections::HashSet;
use std::io;

use crate::error::LabelError;
use crate::reading::Syllable;
use crate::unicode::is_ideograph;

/// Errors from loading dictionary tables.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("invalid entry {key:?}: {reason}")]
    InvalidEntry { key: String, reason: String },
}

/// Reading oracle used by the engine.
///
/// Implementors supply raw lookups; the provided methods enforce the
/// contract (ideographs only, non-empty, deduplicated, default first).
pub trait PhoneticDictionary: Send + Sync {
    /// Every known reading of `c`, default first. Empty when unknown.
    fn lookup_char(&self, c: char) -> Vec<Syllable>;

    /// Per-position readings of a known multi-character entry.
    fn lookup_phrase(&self, word: &str) -> Option<Vec<Syllable>>;

    /// Deduplicated readings of an ideograph, default first.
    fn readings_of(&self, c: char) -> Result<Vec<Syllable>, LabelError> {
        if !is_ideograph(c) {
            return Err(LabelError::invalid(c.to_string(), "not an ideograph"));
        }
        let mut readings = self.lookup_char(c);
        let mut seen = HashSet::new();
        readings.retain(|s| seen.insert(s.clone()));
        if readings.is_empty() {
            return Err(LabelError::DictionaryLookup { ch: c });
        }
        Ok(readings)
    }

    fn default_reading(&self, c: char) -> Result<Syllable, LabelError> {
        let mut readings = self.readings_of(c)?;
        Ok(readings.swap_remove(0))
    }

    fn is_polyphonic(&self, c: char) -> Result<bool, LabelError> {
        Ok(self.readings_of(c)?.len() > 1)
    }

    /// Reading of the character at `pos` inside `word`.
    ///
    /// Uses the phrase entry when one exists for the whole word, and the
    /// character's default reading otherwise.
    fn compound_reading_at(&self, word: &str, pos: usize) -> Result<Syllable, LabelError> {
        let Some(c) = word.chars().nth(pos) else {
            return Err(LabelError::invalid(
                word,
                format!("no character at position {pos}"),
            ));
        };
        if !is_ideograph(c) {
            return Err(LabelError::invalid(
                word,
                format!("character {c:?} at position {pos} is not an ideograph"),
            ));
        }
        if let Some(mut phrase) = self.lookup_phrase(word) {
            if phrase.len() == word.chars().count() {
                return Ok(phrase.swap_remove(pos));
            }
        }
        self.default_reading(c)
    }
}
