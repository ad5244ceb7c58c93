//! One-call labeling pipeline.
//!
//! `LabelEngine` owns the dictionary; every `run` builds its own resolver
//! and reading collection, so runs never share resolution state.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info_span};

use crate::assign::{assign, Assignment};
use crate::classify::{words_from, ClassCounts, Word};
use crate::collection::{CollectionSummary, ReadingCollection};
use crate::compare::{compare, Comparison};
use crate::dict::{DictError, LayeredDictionary, PhoneticDictionary, PinyinDictionary, TableDictionary};
use crate::error::LabelError;
use crate::reading::Syllable;
use crate::resolver::{ContextResolver, Resolution};
use crate::settings::DictionarySettings;
use crate::stats::RunStats;
use crate::strategy::Strategy;
use crate::validate::{validate, ValidationReport};

/// Result of labeling one word list with one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct Run {
    pub strategy: Strategy,
    pub words: Vec<Word>,
    pub assignments: Vec<Assignment>,
    pub collection: CollectionSummary,
    pub validation: ValidationReport,
    /// Polyphonic characters the run resolved, in input order.
    pub polyphones: Vec<Resolution>,
    pub classes: ClassCounts,
    pub stats: RunStats,
}

impl Run {
    pub fn labels(&self) -> Vec<&str> {
        self.assignments.iter().map(|a| a.label.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunPair {
    pub left: Run,
    pub right: Run,
    pub comparison: Comparison,
}

pub struct LabelEngine {
    dict: Arc<dyn PhoneticDictionary>,
}

impl LabelEngine {
    pub fn new(dict: Arc<dyn PhoneticDictionary>) -> Self {
        Self { dict }
    }

    /// Engine over the `pinyin` crate with the built-in phrase table.
    pub fn with_pinyin() -> Result<Self, DictError> {
        Ok(Self::new(Arc::new(PinyinDictionary::with_default_phrases()?)))
    }

    /// Engine configured by the `[dictionary]` settings section. An
    /// override table is layered above the pinyin data.
    pub fn from_settings(settings: &DictionarySettings) -> Result<Self, DictError> {
        let base: Arc<dyn PhoneticDictionary> = if settings.use_default_phrases {
            Arc::new(PinyinDictionary::with_default_phrases()?)
        } else {
            Arc::new(PinyinDictionary::new())
        };

        let dict = match &settings.overrides {
            Some(path) => {
                let user: Arc<dyn PhoneticDictionary> = Arc::new(TableDictionary::open(path)?);
                Arc::new(LayeredDictionary::new(vec![base, user])) as Arc<dyn PhoneticDictionary>
            }
            None => base,
        };
        Ok(Self::new(dict))
    }

    pub fn dictionary(&self) -> &dyn PhoneticDictionary {
        self.dict.as_ref()
    }

    /// Dictionary readings of one character, default first.
    pub fn lookup(&self, c: char) -> Result<Vec<Syllable>, LabelError> {
        self.dict.readings_of(c)
    }

    /// Resolution of `c` in the context of `tokens`.
    pub fn explain<S: AsRef<str>>(&self, tokens: &[S], c: char) -> Result<Resolution, LabelError> {
        let words = words_from(tokens);
        ContextResolver::new(self.dict.as_ref(), &words).explain(c)
    }

    /// Label `tokens` with `strategy`.
    pub fn run<S: AsRef<str>>(&self, tokens: &[S], strategy: Strategy) -> Result<Run, LabelError> {
        let _span = info_span!("run", %strategy, tokens = tokens.len()).entered();

        let words = words_from(tokens);
        let classes = ClassCounts::tally(&words);
        debug!(
            single = classes.single,
            compound = classes.compound,
            foreign = classes.foreign,
            mixed = classes.mixed,
            other = classes.other,
            "classified"
        );

        let mut resolver = ContextResolver::new(self.dict.as_ref(), &words);
        let collection = ReadingCollection::build(&words, &mut resolver, strategy)?;
        let assignments = assign(&words, &collection, &mut resolver, strategy)?;
        let validation = validate(&assignments);
        let polyphones = resolver.polyphone_report()?;
        let stats = RunStats::from_assignments(&assignments);

        Ok(Run {
            strategy,
            stats,
            collection: collection.summary(),
            assignments,
            validation,
            polyphones,
            classes,
            words,
        })
    }

    /// Label `tokens` with both strategies and diff the results.
    pub fn run_pair<S: AsRef<str>>(
        &self,
        tokens: &[S],
        left: Strategy,
        right: Strategy,
    ) -> Result<RunPair, LabelError> {
        let left = self.run(tokens, left)?;
        let right = self.run(tokens, right)?;
        let comparison = compare(&left.assignments, &right.assignments)?;
        Ok(RunPair {
            left,
            right,
            comparison,
        })
    }
}
