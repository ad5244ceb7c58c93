//! Context-driven reading selection for polyphonic characters.
//!
//! A character's reading is decided by majority vote over the corpus
//! compounds that start with it. Results are memoized per run so a
//! character resolves identically everywhere it is used.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::trace;

use crate::classify::{Word, WordClass};
use crate::dict::PhoneticDictionary;
use crate::error::LabelError;
use crate::reading::{Reading, Syllable};

/// Per-run memo of resolved characters.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    resolved: HashMap<char, Syllable>,
}

impl ResolutionCache {
    pub fn get(&self, c: char) -> Option<&Syllable> {
        self.resolved.get(&c)
    }

    pub fn contains(&self, c: char) -> bool {
        self.resolved.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    pub fn clear(&mut self) {
        self.resolved.clear();
    }

    fn insert(&mut self, c: char, s: Syllable) {
        self.resolved.insert(c, s);
    }
}

/// How one character was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub ch: char,
    /// Dictionary readings, default first.
    pub readings: Vec<Syllable>,
    /// Vote count per reading, in `readings` order.
    pub votes: Vec<usize>,
    /// Compounds starting with `ch`, in input order.
    pub supporting_words: Vec<String>,
    pub chosen: Syllable,
}

impl Resolution {
    pub fn default_reading(&self) -> &Syllable {
        &self.readings[0]
    }

    pub fn is_polyphonic(&self) -> bool {
        self.readings.len() > 1
    }

    /// The corpus overrode the dictionary default.
    pub fn differs_from_default(&self) -> bool {
        self.chosen != self.readings[0]
    }
}

pub struct ContextResolver<'a> {
    dict: &'a dyn PhoneticDictionary,
    words: &'a [Word],
    /// First character → positions in `words` of compounds starting with it.
    compounds_by_head: HashMap<char, Vec<usize>>,
    cache: ResolutionCache,
}

impl<'a> ContextResolver<'a> {
    pub fn new(dict: &'a dyn PhoneticDictionary, words: &'a [Word]) -> Self {
        let mut compounds_by_head: HashMap<char, Vec<usize>> = HashMap::new();
        for (pos, word) in words.iter().enumerate() {
            if word.class() != WordClass::CompoundIdeograph {
                continue;
            }
            if let Some(head) = word.char_at(0) {
                compounds_by_head.entry(head).or_default().push(pos);
            }
        }
        Self {
            dict,
            words,
            compounds_by_head,
            cache: ResolutionCache::default(),
        }
    }

    pub fn dictionary(&self) -> &'a dyn PhoneticDictionary {
        self.dict
    }

    /// Resolved reading of `c`, memoized.
    pub fn resolve(&mut self, c: char) -> Result<Syllable, LabelError> {
        if let Some(s) = self.cache.get(c) {
            return Ok(s.clone());
        }
        let resolution = self.explain(c)?;
        trace!(ch = %c, chosen = %resolution.chosen, "resolved");
        self.cache.insert(c, resolution.chosen.clone());
        Ok(resolution.chosen)
    }

    /// Full-word reading: every character resolved independently.
    pub fn resolve_word(&mut self, word: &Word) -> Result<Reading, LabelError> {
        let mut syllables = Vec::with_capacity(word.char_len());
        for c in word.chars() {
            syllables.push(self.resolve(c)?);
        }
        Reading::concat(syllables).ok_or_else(|| LabelError::invalid(word.text(), "empty word"))
    }

    /// Resolve every character up front. Afterwards `cached` answers
    /// without mutation, so the resolver can be shared read-only.
    pub fn prime<I: IntoIterator<Item = char>>(&mut self, chars: I) -> Result<(), LabelError> {
        for c in chars {
            self.resolve(c)?;
        }
        Ok(())
    }

    pub fn cached(&self, c: char) -> Option<&Syllable> {
        self.cache.get(c)
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Forget every memoized resolution.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Run the vote for `c` without touching the cache.
    pub fn explain(&self, c: char) -> Result<Resolution, LabelError> {
        let readings = self.dict.readings_of(c)?;
        let supporting: &[usize] = self
            .compounds_by_head
            .get(&c)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut votes = vec![0usize; readings.len()];
        if readings.len() > 1 {
            for &pos in supporting {
                let head = self.dict.compound_reading_at(self.words[pos].text(), 0)?;
                // Readings outside the character's own list do not vote.
                if let Some(i) = readings.iter().position(|r| *r == head) {
                    votes[i] += 1;
                }
            }
        }

        // Strictly greater: ties stay with the earlier (more common) reading.
        let mut best = 0;
        for (i, &n) in votes.iter().enumerate().skip(1) {
            if n > votes[best] {
                best = i;
            }
        }

        Ok(Resolution {
            ch: c,
            chosen: readings[best].clone(),
            readings,
            votes,
            supporting_words: supporting
                .iter()
                .map(|&pos| self.words[pos].text().to_string())
                .collect(),
        })
    }

    /// Polyphonic characters resolved so far, in order of first appearance
    /// in the input.
    pub fn polyphone_report(&self) -> Result<Vec<Resolution>, LabelError> {
        let mut seen = HashSet::new();
        let mut report = Vec::new();
        for word in self.words {
            for c in word.chars() {
                if !self.cache.contains(c) || !seen.insert(c) {
                    continue;
                }
                let resolution = self.explain(c)?;
                if resolution.is_polyphonic() {
                    report.push(resolution);
                }
            }
        }
        Ok(report)
    }
}
