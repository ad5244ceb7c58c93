//! Token classification.

use serde::Serialize;

use crate::unicode::{is_ideograph, is_latin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordClass {
    /// Exactly one ideograph.
    SingleIdeograph,
    /// Exactly two ideographs.
    CompoundIdeograph,
    /// Only ASCII letters.
    ForeignWord,
    /// At least one ideograph and at least one ASCII letter.
    MixedWord,
    /// Digits, punctuation, longer ideograph runs, empty tokens.
    Other,
}

impl WordClass {
    pub fn name(self) -> &'static str {
        match self {
            WordClass::SingleIdeograph => "single",
            WordClass::CompoundIdeograph => "compound",
            WordClass::ForeignWord => "foreign",
            WordClass::MixedWord => "mixed",
            WordClass::Other => "other",
        }
    }

    /// One or two ideographs: the only shapes the engine escalates.
    pub fn is_ideographic(self) -> bool {
        matches!(
            self,
            WordClass::SingleIdeograph | WordClass::CompoundIdeograph
        )
    }
}

pub fn classify(token: &str) -> WordClass {
    let mut len = 0usize;
    let mut ideographs = 0usize;
    let mut latin = 0usize;
    for c in token.chars() {
        len += 1;
        if is_ideograph(c) {
            ideographs += 1;
        } else if is_latin(c) {
            latin += 1;
        }
    }

    match (len, ideographs, latin) {
        (1, 1, _) => WordClass::SingleIdeograph,
        (2, 2, _) => WordClass::CompoundIdeograph,
        (n, 0, l) if n > 0 && l == n => WordClass::ForeignWord,
        (_, i, l) if i > 0 && l > 0 => WordClass::MixedWord,
        _ => WordClass::Other,
    }
}

/// An input token with its position and derived attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    index: usize,
    text: String,
    class: WordClass,
    char_len: usize,
}

impl Word {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let class = classify(&text);
        let char_len = text.chars().count();
        Self {
            index,
            text,
            class,
            char_len,
        }
    }

    /// Position in the input sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn class(&self) -> WordClass {
        self.class
    }

    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.text.chars().nth(pos)
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }
}

/// Wrap tokens as `Word`s whose index is their position.
pub fn words_from<S: AsRef<str>>(tokens: &[S]) -> Vec<Word> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, t)| Word::new(i, t.as_ref()))
        .collect()
}

/// Per-class word counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub single: usize,
    pub compound: usize,
    pub foreign: usize,
    pub mixed: usize,
    pub other: usize,
}

impl ClassCounts {
    pub fn tally(words: &[Word]) -> Self {
        let mut counts = Self::default();
        for w in words {
            match w.class() {
                WordClass::SingleIdeograph => counts.single += 1,
                WordClass::CompoundIdeograph => counts.compound += 1,
                WordClass::ForeignWord => counts.foreign += 1,
                WordClass::MixedWord => counts.mixed += 1,
                WordClass::Other => counts.other += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.single + self.compound + self.foreign + self.mixed + self.other
    }
}
