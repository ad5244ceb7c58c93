use pinyin::{ToPinyin, ToPinyinMulti};
use tracing::trace;

use super::{parse_table_toml, DictError, PhoneticDictionary, TableDictionary};
use crate::reading::Syllable;

pub const DEFAULT_PHRASES_TOML: &str = include_str!("default_phrases.toml");

/// Dictionary backed by the `pinyin` crate, with a phrase table for
/// compound-aware lookups.
pub struct PinyinDictionary {
    phrases: TableDictionary,
}

impl PinyinDictionary {
    /// Character data only; compounds fall back to each character's default.
    pub fn new() -> Self {
        Self {
            phrases: TableDictionary::new(),
        }
    }

    /// Character data plus the embedded phrase table.
    pub fn with_default_phrases() -> Result<Self, DictError> {
        Ok(Self::with_phrases(parse_table_toml(DEFAULT_PHRASES_TOML)?))
    }

    /// Character data plus a caller-supplied phrase table. Only the
    /// table's `[phrases]` are consulted.
    pub fn with_phrases(phrases: TableDictionary) -> Self {
        Self { phrases }
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.phrase_count()
    }
}

impl Default for PinyinDictionary {
    fn default() -> Self {
        Self::new()
    }
}

fn to_syllable(numbered: &str) -> Option<Syllable> {
    match numbered.parse() {
        Ok(s) => Some(s),
        Err(e) => {
            trace!("skipping unparsable pinyin {numbered:?}: {e}");
            None
        }
    }
}

impl PhoneticDictionary for PinyinDictionary {
    fn lookup_char(&self, c: char) -> Vec<Syllable> {
        let mut readings = Vec::new();
        if let Some(p) = c.to_pinyin() {
            readings.extend(to_syllable(p.with_tone_num_end()));
        }
        if let Some(multi) = c.to_pinyin_multi() {
            for p in multi {
                readings.extend(to_syllable(p.with_tone_num_end()));
            }
        }
        readings
    }

    fn lookup_phrase(&self, word: &str) -> Option<Vec<Syllable>> {
        self.phrases.lookup_phrase(word)
    }
}
