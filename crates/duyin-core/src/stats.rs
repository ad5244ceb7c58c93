//! Summary statistics over a finished run.

use std::collections::HashMap;

use serde::Serialize;

use crate::assign::{Assignment, Tier};
use crate::reading::{Reading, Tone};

/// Syllable count per tone over every label reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToneDistribution {
    pub first: usize,
    pub second: usize,
    pub third: usize,
    pub fourth: usize,
    pub neutral: usize,
}

impl ToneDistribution {
    fn add(&mut self, tone: Tone) {
        match tone {
            Tone::First => self.first += 1,
            Tone::Second => self.second += 1,
            Tone::Third => self.third += 1,
            Tone::Fourth => self.fourth += 1,
            Tone::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, tone: Tone) -> usize {
        match tone {
            Tone::First => self.first,
            Tone::Second => self.second,
            Tone::Third => self.third,
            Tone::Fourth => self.fourth,
            Tone::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.first + self.second + self.third + self.fourth + self.neutral
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingFrequency {
    pub reading: Reading,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub total: usize,
    /// Words per tier, in `Tier::ALL` order; zero counts included.
    pub tiers: Vec<(Tier, usize)>,
    pub escalated: usize,
    pub tones: ToneDistribution,
    /// Label readings by count descending, ties in order of first use.
    pub frequency: Vec<ReadingFrequency>,
    /// Label readings used by more than one word.
    pub duplicated: usize,
}

impl RunStats {
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut tiers: Vec<(Tier, usize)> = Tier::ALL.iter().map(|&t| (t, 0)).collect();
        let mut tones = ToneDistribution::default();
        let mut frequency: Vec<ReadingFrequency> = Vec::new();
        let mut slot: HashMap<&Reading, usize> = HashMap::new();

        for a in assignments {
            if let Some(entry) = tiers.iter_mut().find(|(t, _)| *t == a.tier) {
                entry.1 += 1;
            }
            let Some(reading) = &a.reading else {
                continue;
            };
            for s in reading.syllables() {
                tones.add(s.tone());
            }
            match slot.get(reading) {
                Some(&i) => frequency[i].count += 1,
                None => {
                    slot.insert(reading, frequency.len());
                    frequency.push(ReadingFrequency {
                        reading: reading.clone(),
                        count: 1,
                    });
                }
            }
        }

        // Stable: equal counts keep first-use order.
        frequency.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total: assignments.len(),
            escalated: assignments.iter().filter(|a| a.escalated()).count(),
            duplicated: frequency.iter().filter(|f| f.count > 1).count(),
            tiers,
            tones,
            frequency,
        }
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.tiers
            .iter()
            .find(|(t, _)| *t == tier)
            .map_or(0, |&(_, n)| n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::WordClass;
    use crate::reading::{parse_syllables, Syllable};

    fn a(index: usize, label: &str, reading: &[&str], tier: Tier) -> Assignment {
        let syllables: Vec<Syllable> = parse_syllables(reading).unwrap();
        Assignment {
            index,
            word: label.to_string(),
            class: WordClass::CompoundIdeograph,
            label: label.to_string(),
            reading: Reading::concat(syllables),
            tier,
            collision_count: 1,
            tier_counts: Vec::new(),
            shared_with: Vec::new(),
            hint: None,
        }
    }

    #[test]
    fn counts_tiers_and_tones() {
        let stats = RunStats::from_assignments(&[
            a(0, "银", &["yin2"], Tier::Identity),
            a(1, "行", &["hang2"], Tier::SecondChar),
            a(2, "银河", &["yin2", "he2"], Tier::FullWord),
            a(3, "吗", &["ma"], Tier::Identity),
            a(4, "A", &[], Tier::Excluded),
        ]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.tier_count(Tier::Identity), 2);
        assert_eq!(stats.tier_count(Tier::FirstChar), 0);
        assert_eq!(stats.escalated, 2);
        assert_eq!(stats.tones.second, 4);
        assert_eq!(stats.tones.get(Tone::Neutral), 1);
        assert_eq!(stats.tones.total(), 5);
    }

    #[test]
    fn frequency_sorts_by_count_then_first_use() {
        let stats = RunStats::from_assignments(&[
            a(0, "长", &["chang2"], Tier::FirstChar),
            a(1, "银", &["yin2"], Tier::FirstChar),
            a(2, "银", &["yin2"], Tier::FirstChar),
            a(3, "重", &["chong2"], Tier::FirstChar),
        ]);
        let order: Vec<(String, usize)> = stats
            .frequency
            .iter()
            .map(|f| (f.reading.to_string(), f.count))
            .collect();
        assert_eq!(
            order,
            vec![
                ("yin2".to_string(), 2),
                ("chang2".to_string(), 1),
                ("chong2".to_string(), 1)
            ]
        );
        assert_eq!(stats.duplicated, 1);
    }
}
