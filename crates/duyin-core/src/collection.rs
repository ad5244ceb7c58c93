//! The reading multiset against which tier uniqueness is tested.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::classify::{Word, WordClass};
use crate::error::LabelError;
use crate::reading::Syllable;
use crate::resolver::ContextResolver;
use crate::strategy::Strategy;

/// Multiset of resolved syllables for one run.
///
/// Built once over the whole corpus before any assignment and never
/// mutated afterwards. Each member records the input index of the word
/// that contributed it.
#[derive(Debug, Clone, Default)]
pub struct ReadingCollection {
    members: HashMap<Syllable, Vec<usize>>,
    /// Syllables in order of first contribution.
    order: Vec<Syllable>,
    total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub members: usize,
    pub distinct: usize,
    /// Distinct syllables contributed more than once.
    pub duplicated: usize,
}

impl ReadingCollection {
    /// Build the collection for `strategy`.
    ///
    /// The strict strategy rejects out-of-scope tokens and colliding
    /// single characters before any compound is looked at.
    pub fn build(
        words: &[Word],
        resolver: &mut ContextResolver<'_>,
        strategy: Strategy,
    ) -> Result<Self, LabelError> {
        let _span = debug_span!("build_collection", %strategy, words = words.len()).entered();

        if strategy.is_strict() {
            strict_gate(words)?;
            check_singles_distinct(words, resolver)?;
        }

        let mut collection = Self::default();
        for word in words {
            match word.class() {
                WordClass::SingleIdeograph if strategy.collects_singles() => {
                    let c = head(word)?;
                    collection.insert(resolver.resolve(c)?, word.index());
                }
                WordClass::CompoundIdeograph => {
                    let first = head(word)?;
                    collection.insert(resolver.resolve(first)?, word.index());
                    if strategy.collects_second_chars() {
                        let second = word
                            .char_at(1)
                            .ok_or_else(|| LabelError::invalid(word.text(), "missing second character"))?;
                        collection.insert(resolver.resolve(second)?, word.index());
                    }
                }
                _ => {}
            }
        }

        debug!(
            members = collection.len(),
            distinct = collection.distinct(),
            duplicated = collection.duplicated().len()
        );
        Ok(collection)
    }

    fn insert(&mut self, s: Syllable, index: usize) {
        let contributors = self.members.entry(s.clone()).or_default();
        if contributors.is_empty() {
            self.order.push(s);
        }
        contributors.push(index);
        self.total += 1;
    }

    /// Multiplicity of `s`.
    pub fn count(&self, s: &Syllable) -> usize {
        self.members.get(s).map_or(0, Vec::len)
    }

    /// Input indices of the words that contributed `s`, in input order.
    /// A compound contributing the same syllable twice appears twice.
    pub fn contributors(&self, s: &Syllable) -> &[usize] {
        self.members.get(s).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn distinct(&self) -> usize {
        self.order.len()
    }

    /// Syllables with multiplicity above one, in order of first contribution.
    pub fn duplicated(&self) -> Vec<(&Syllable, usize)> {
        self.order
            .iter()
            .map(|s| (s, self.count(s)))
            .filter(|&(_, n)| n > 1)
            .collect()
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            members: self.len(),
            distinct: self.distinct(),
            duplicated: self.duplicated().len(),
        }
    }
}

fn head(word: &Word) -> Result<char, LabelError> {
    word.char_at(0)
        .ok_or_else(|| LabelError::invalid(word.text(), "empty word"))
}

/// Reject any token that is not one or two ideographs.
pub fn strict_gate(words: &[Word]) -> Result<(), LabelError> {
    match words.iter().find(|w| !w.class().is_ideographic()) {
        Some(w) => Err(LabelError::invalid(
            w.text(),
            format!(
                "word #{} is {}; strict input accepts only one or two ideographs",
                w.index(),
                w.class().name()
            ),
        )),
        None => Ok(()),
    }
}

/// Single-character words must have pairwise distinct readings: there is
/// no larger unit to escalate them to.
pub fn check_singles_distinct(
    words: &[Word],
    resolver: &mut ContextResolver<'_>,
) -> Result<(), LabelError> {
    let mut owners: HashMap<Syllable, &Word> = HashMap::new();
    for word in words {
        if word.class() != WordClass::SingleIdeograph {
            continue;
        }
        let reading = resolver.resolve(head(word)?)?;
        if let Some(first) = owners.get(&reading) {
            return Err(LabelError::FatalCollision {
                reading,
                first: first.text().to_string(),
                first_index: first.index(),
                second: word.text().to_string(),
                second_index: word.index(),
            });
        }
        owners.insert(reading, word);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::words_from;
    use crate::testutil::{syl, test_dict};

    fn build(tokens: &[&str], strategy: Strategy) -> Result<ReadingCollection, LabelError> {
        let dict = test_dict();
        let words = words_from(tokens);
        let mut resolver = ContextResolver::new(&dict, &words);
        ReadingCollection::build(&words, &mut resolver, strategy)
    }

    #[test]
    fn first_char_collects_compound_heads_only() {
        let c = build(&["银", "银行", "银河", "长城", "ABC"], Strategy::FirstChar).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.count(&syl("yin2")), 2);
        assert_eq!(c.count(&syl("chang2")), 1);
        assert_eq!(c.count(&syl("hang2")), 0);
        assert_eq!(c.contributors(&syl("yin2")), &[1, 2]);
    }

    #[test]
    fn union_collects_heads_tails_and_singles() {
        let c = build(&["银", "河", "银行", "银河"], Strategy::Union).unwrap();
        assert_eq!(c.len(), 6);
        assert_eq!(c.count(&syl("yin2")), 3);
        assert_eq!(c.count(&syl("hang2")), 1);
        assert_eq!(c.count(&syl("he2")), 2);
        assert_eq!(c.contributors(&syl("he2")), &[1, 3]);
        assert_eq!(
            c.summary(),
            CollectionSummary {
                members: 6,
                distinct: 3,
                duplicated: 2
            }
        );
    }

    #[test]
    fn union_ignores_passthrough_words() {
        let c = build(&["银行", "iPhone", "A梦", "5G"], Strategy::Union).unwrap();
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn context_vote_collects_singles_and_heads() {
        let c = build(&["银", "河", "银行", "银河"], Strategy::ContextVote).unwrap();
        assert_eq!(c.len(), 4);
        assert_eq!(c.count(&syl("yin2")), 3);
        assert_eq!(c.count(&syl("hang2")), 0);
    }

    #[test]
    fn duplicated_follows_first_contribution() {
        let c = build(&["长城", "长江", "银行", "银河"], Strategy::FirstChar).unwrap();
        let dups: Vec<String> = c.duplicated().iter().map(|(s, _)| s.to_string()).collect();
        assert_eq!(dups, vec!["chang2", "yin2"]);
    }

    #[test]
    fn strict_gate_rejects_other_tokens() {
        for bad in ["abc", "银行卡", "A梦", "5G"] {
            let err = build(&["银行", bad], Strategy::ContextVote).unwrap_err();
            match err {
                LabelError::InvalidInput { token, .. } => assert_eq!(token, bad),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn colliding_singles_are_fatal() {
        let err = build(&["行", "行"], Strategy::ContextVote).unwrap_err();
        assert_eq!(
            err,
            LabelError::FatalCollision {
                reading: syl("hang2"),
                first: "行".to_string(),
                first_index: 0,
                second: "行".to_string(),
                second_index: 1,
            }
        );
    }

    #[test]
    fn fatal_collision_precedes_compound_processing() {
        // 龘 is unknown: reaching the compound would be a lookup error.
        let err = build(&["行", "银龘", "行"], Strategy::ContextVote).unwrap_err();
        assert!(matches!(err, LabelError::FatalCollision { .. }));
    }

    #[test]
    fn colliding_singles_are_fine_outside_strict_mode() {
        let c = build(&["行", "行"], Strategy::Union).unwrap();
        assert_eq!(c.count(&syl("hang2")), 2);
    }
}
