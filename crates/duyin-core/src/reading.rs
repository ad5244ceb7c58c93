//! Normalized pinyin readings.
//!
//! A `Syllable` is one character's reading (base + tone); a `Reading` is
//! the syllable sequence of a label, which is a single syllable for a
//! one-character label and the concatenation of every character's
//! syllable for a full-word label.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    First,
    Second,
    Third,
    Fourth,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::First,
        Tone::Second,
        Tone::Third,
        Tone::Fourth,
        Tone::Neutral,
    ];

    /// Tone number as written after the syllable: 0 for neutral, 1–4 otherwise.
    pub fn number(self) -> u8 {
        match self {
            Tone::Neutral => 0,
            Tone::First => 1,
            Tone::Second => 2,
            Tone::Third => 3,
            Tone::Fourth => 4,
        }
    }

    /// Both `0` and `5` denote the neutral tone.
    pub fn from_number(n: u8) -> Option<Tone> {
        match n {
            0 | 5 => Some(Tone::Neutral),
            1 => Some(Tone::First),
            2 => Some(Tone::Second),
            3 => Some(Tone::Third),
            4 => Some(Tone::Fourth),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid reading {0:?}: expected a pinyin syllable with an optional tone digit 0-5")]
pub struct ParseReadingError(pub String);

/// One character's reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Syllable {
    base: String,
    tone: Tone,
}

impl Syllable {
    /// Build a syllable from an already-split base and tone.
    ///
    /// The base is lowercased and `v` is folded to `ü` so that `lv4` and
    /// `lü4` compare equal.
    pub fn new(base: &str, tone: Tone) -> Result<Self, ParseReadingError> {
        let normalized: String = base
            .chars()
            .map(|c| match c.to_ascii_lowercase() {
                'v' => 'ü',
                other => other,
            })
            .collect();
        if normalized.is_empty()
            || !normalized
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == 'ü')
        {
            return Err(ParseReadingError(base.to_string()));
        }
        Ok(Self {
            base: normalized,
            tone,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }
}

impl FromStr for Syllable {
    type Err = ParseReadingError;

    /// Parse numeric-tone-at-end text such as `hang2`, `ma5` or `ma`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (base, tone) = match s.chars().last() {
            Some(d) if d.is_ascii_digit() => {
                let n = d as u8 - b'0';
                let tone = Tone::from_number(n).ok_or_else(|| ParseReadingError(s.to_string()))?;
                (&s[..s.len() - 1], tone)
            }
            _ => (s, Tone::Neutral),
        };
        Syllable::new(base, tone).map_err(|_| ParseReadingError(s.to_string()))
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.tone.number())
    }
}

impl Serialize for Syllable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reading of a label: one syllable per character, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reading {
    syllables: Vec<Syllable>,
}

impl Reading {
    /// Concatenate per-character syllables. Returns `None` for an empty sequence.
    pub fn concat(syllables: Vec<Syllable>) -> Option<Self> {
        if syllables.is_empty() {
            None
        } else {
            Some(Self { syllables })
        }
    }

    pub fn syllables(&self) -> &[Syllable] {
        &self.syllables
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }
}

impl From<Syllable> for Reading {
    fn from(s: Syllable) -> Self {
        Self { syllables: vec![s] }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.syllables {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a list of syllable strings, as found in dictionary tables.
pub fn parse_syllables<S: AsRef<str>>(items: &[S]) -> Result<Vec<Syllable>, ParseReadingError> {
    items.iter().map(|s| s.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syl(s: &str) -> Syllable {
        s.parse().unwrap()
    }

    #[test]
    fn parse_tone_numbers() {
        assert_eq!(syl("hang2").tone(), Tone::Second);
        assert_eq!(syl("hang2").base(), "hang");
        assert_eq!(syl("ma5").tone(), Tone::Neutral);
        assert_eq!(syl("ma0").tone(), Tone::Neutral);
        assert_eq!(syl("ma"), syl("ma5"));
    }

    #[test]
    fn parse_normalizes_case_and_umlaut() {
        assert_eq!(syl("LV4"), syl("lü4"));
        assert_eq!(syl("Hang2").to_string(), "hang2");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Syllable>().is_err());
        assert!("2".parse::<Syllable>().is_err());
        assert!("hang9".parse::<Syllable>().is_err());
        assert!("ha ng2".parse::<Syllable>().is_err());
        assert!("行".parse::<Syllable>().is_err());
    }

    #[test]
    fn equality_needs_base_and_tone() {
        assert_ne!(syl("hang2"), syl("hang4"));
        assert_ne!(syl("hang2"), syl("xing2"));
        assert_eq!(syl("hang2"), syl("hang2"));
    }

    #[test]
    fn reading_display_concatenates() {
        let r = Reading::concat(vec![syl("yin2"), syl("he2")]).unwrap();
        assert_eq!(r.to_string(), "yin2he2");
        assert_eq!(r.len(), 2);
        assert_eq!(Reading::from(syl("ma")).to_string(), "ma0");
        assert!(Reading::concat(Vec::new()).is_none());
    }

    #[test]
    fn single_and_concatenated_readings_differ() {
        let single = Reading::from(syl("yin2"));
        let full = Reading::concat(vec![syl("yin2"), syl("he2")]).unwrap();
        assert_ne!(single, full);
    }
}
