//! Escalation assignment: pick each word's label.
//!
//! Each compound walks its strategy's tiers in order and takes the first
//! one whose syllable occurs exactly once in the reading collection. The
//! collection is read-only here, so two words never race for a reading
//! and the outcome does not depend on processing order.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::classify::{Word, WordClass};
use crate::collection::ReadingCollection;
use crate::error::LabelError;
use crate::reading::{Reading, Syllable};
use crate::resolver::ContextResolver;
use crate::strategy::Strategy;
use crate::unicode::is_ideograph;

/// Label form chosen for a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The word's first character.
    FirstChar,
    /// The word's second character.
    SecondChar,
    /// The whole word; last resort, accepted without a uniqueness test.
    FullWord,
    /// The word labels itself without escalation.
    Identity,
    /// Out of the strategy's scope; emitted but never validated.
    Excluded,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::FirstChar,
        Tier::SecondChar,
        Tier::FullWord,
        Tier::Identity,
        Tier::Excluded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tier::FirstChar => "first_char",
            Tier::SecondChar => "second_char",
            Tier::FullWord => "full_word",
            Tier::Identity => "identity",
            Tier::Excluded => "excluded",
        }
    }

    /// Character position a character tier labels with.
    fn position(self) -> Option<usize> {
        match self {
            Tier::FirstChar => Some(0),
            Tier::SecondChar => Some(1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub index: usize,
    pub word: String,
    pub class: WordClass,
    /// One character of the word, or the word itself.
    pub label: String,
    /// Reading the label stands for; `None` for words without pinyin.
    pub reading: Option<Reading>,
    pub tier: Tier,
    /// Multiplicity observed at the first tier tried (1 when the word was
    /// not escalated, 0 when no collection test applied).
    pub collision_count: usize,
    /// Multiplicity observed at every character tier tried, in order.
    pub tier_counts: Vec<(Tier, usize)>,
    /// Other words contributing the first-tested reading, in input order.
    pub shared_with: Vec<usize>,
    /// Mixed words only: default reading of the first ideograph. Shown in
    /// reports; never part of a validation key.
    pub hint: Option<Syllable>,
}

impl Assignment {
    fn unescalated(word: &Word, reading: Option<Reading>, tier: Tier) -> Self {
        Self {
            index: word.index(),
            word: word.text().to_string(),
            class: word.class(),
            label: word.text().to_string(),
            reading,
            tier,
            collision_count: 0,
            tier_counts: Vec::new(),
            shared_with: Vec::new(),
            hint: None,
        }
    }

    /// A tier past the first was needed.
    pub fn escalated(&self) -> bool {
        matches!(self.tier, Tier::SecondChar | Tier::FullWord)
    }
}

/// Assign a label to every word, in input order.
pub fn assign(
    words: &[Word],
    collection: &ReadingCollection,
    resolver: &mut ContextResolver<'_>,
    strategy: Strategy,
) -> Result<Vec<Assignment>, LabelError> {
    let _span = debug_span!("assign", %strategy, words = words.len()).entered();

    let mut out = Vec::with_capacity(words.len());
    for word in words {
        out.push(assign_word(word, collection, resolver, strategy)?);
    }

    debug!(
        escalated = out.iter().filter(|a| a.escalated()).count(),
        full_word = out.iter().filter(|a| a.tier == Tier::FullWord).count()
    );
    Ok(out)
}

fn assign_word(
    word: &Word,
    collection: &ReadingCollection,
    resolver: &mut ContextResolver<'_>,
    strategy: Strategy,
) -> Result<Assignment, LabelError> {
    match word.class() {
        WordClass::CompoundIdeograph => {
            escalate(word, collection, resolver, strategy.compound_tiers())
        }
        WordClass::SingleIdeograph => match strategy.single_tier() {
            Tier::Identity => {
                let c = word
                    .char_at(0)
                    .ok_or_else(|| LabelError::invalid(word.text(), "empty word"))?;
                let syllable = resolver.resolve(c)?;
                let mut a = Assignment::unescalated(word, None, Tier::Identity);
                if strategy.collects_singles() {
                    a.collision_count = collection.count(&syllable);
                    a.shared_with = others(collection.contributors(&syllable), word.index());
                }
                a.reading = Some(Reading::from(syllable));
                Ok(a)
            }
            tier => Ok(Assignment::unescalated(word, None, tier)),
        },
        WordClass::MixedWord => {
            let hint = word
                .chars()
                .find(|&c| is_ideograph(c))
                .and_then(|c| resolver.dictionary().default_reading(c).ok());
            Ok(Assignment {
                hint,
                ..Assignment::unescalated(word, None, strategy.passthrough_tier())
            })
        }
        _ => Ok(Assignment::unescalated(
            word,
            None,
            strategy.passthrough_tier(),
        )),
    }
}

fn escalate(
    word: &Word,
    collection: &ReadingCollection,
    resolver: &mut ContextResolver<'_>,
    tiers: &[Tier],
) -> Result<Assignment, LabelError> {
    let mut tier_counts = Vec::with_capacity(tiers.len());
    let mut shared_with = None;

    for &tier in tiers {
        let Some(pos) = tier.position() else {
            // Full word: no further tier exists, so it is taken as is.
            let reading = resolver.resolve_word(word)?;
            return Ok(Assignment {
                label: word.text().to_string(),
                reading: Some(reading),
                tier,
                collision_count: tier_counts.first().map_or(0, |&(_, n)| n),
                tier_counts,
                shared_with: shared_with.unwrap_or_default(),
                ..Assignment::unescalated(word, None, tier)
            });
        };

        let c = word.char_at(pos).ok_or_else(|| {
            LabelError::invalid(word.text(), format!("no character at position {pos}"))
        })?;
        let syllable = resolver.resolve(c)?;
        let count = collection.count(&syllable);
        tier_counts.push((tier, count));
        if shared_with.is_none() {
            shared_with = Some(others(collection.contributors(&syllable), word.index()));
        }

        if count == 1 {
            return Ok(Assignment {
                label: c.to_string(),
                reading: Some(Reading::from(syllable)),
                tier,
                collision_count: tier_counts[0].1,
                tier_counts,
                shared_with: shared_with.unwrap_or_default(),
                ..Assignment::unescalated(word, None, tier)
            });
        }
    }

    Err(LabelError::invalid(
        word.text(),
        "tier sequence ended without a full-word tier",
    ))
}

/// `contributors` without `own`, deduplicated, order kept.
fn others(contributors: &[usize], own: usize) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::new();
    for &i in contributors {
        if i != own && out.last() != Some(&i) {
            out.push(i);
        }
    }
    out
}
