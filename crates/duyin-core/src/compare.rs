//! Word-by-word diff of two assignment sequences over the same input.

use serde::Serialize;

use crate::assign::{Assignment, Tier};
use crate::error::LabelError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Difference {
    pub index: usize,
    pub word: String,
    pub left_label: String,
    pub right_label: String,
    pub left_tier: Tier,
    pub right_tier: Tier,
    pub left_collisions: usize,
    pub right_collisions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub same: usize,
    pub different: usize,
    pub differences: Vec<Difference>,
}

impl Comparison {
    pub fn total(&self) -> usize {
        self.same + self.different
    }

    /// Share of words labeled identically, in `[0, 1]`. 1 for empty input.
    pub fn agreement(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            n => self.same as f64 / n as f64,
        }
    }
}

/// Compare two assignment runs over the same words. Labels are compared
/// as text; two runs agreeing on a label may still disagree on its tier.
pub fn compare(left: &[Assignment], right: &[Assignment]) -> Result<Comparison, LabelError> {
    if left.len() != right.len() {
        return Err(LabelError::invalid(
            format!("{} vs {} words", left.len(), right.len()),
            "compared runs differ in length",
        ));
    }

    let mut cmp = Comparison::default();
    for (l, r) in left.iter().zip(right) {
        if l.word != r.word || l.index != r.index {
            return Err(LabelError::invalid(
                format!("{} vs {}", l.word, r.word),
                format!("compared runs diverge at #{}", l.index),
            ));
        }
        if l.label == r.label {
            cmp.same += 1;
        } else {
            cmp.different += 1;
            cmp.differences.push(Difference {
                index: l.index,
                word: l.word.clone(),
                left_label: l.label.clone(),
                right_label: r.label.clone(),
                left_tier: l.tier,
                right_tier: r.tier,
                left_collisions: l.collision_count,
                right_collisions: r.collision_count,
            });
        }
    }
    Ok(cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::WordClass;

    fn a(index: usize, word: &str, label: &str, tier: Tier) -> Assignment {
        Assignment {
            index,
            word: word.to_string(),
            class: WordClass::CompoundIdeograph,
            label: label.to_string(),
            reading: None,
            tier,
            collision_count: 2,
            tier_counts: Vec::new(),
            shared_with: Vec::new(),
            hint: None,
        }
    }

    #[test]
    fn counts_and_lists_differences() {
        let left = vec![
            a(0, "银行", "银行", Tier::FullWord),
            a(1, "长城", "长", Tier::FirstChar),
        ];
        let right = vec![
            a(0, "银行", "行", Tier::SecondChar),
            a(1, "长城", "长", Tier::FirstChar),
        ];
        let cmp = compare(&left, &right).unwrap();
        assert_eq!(cmp.same, 1);
        assert_eq!(cmp.different, 1);
        let d = &cmp.differences[0];
        assert_eq!(d.index, 0);
        assert_eq!(d.left_label, "银行");
        assert_eq!(d.right_label, "行");
        assert_eq!(d.left_tier, Tier::FullWord);
        assert_eq!(d.right_tier, Tier::SecondChar);
        assert!((cmp.agreement() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn length_mismatch_is_invalid_input() {
        let left = vec![a(0, "银行", "银", Tier::FirstChar)];
        assert!(matches!(
            compare(&left, &[]),
            Err(LabelError::InvalidInput { .. })
        ));
    }

    #[test]
    fn word_mismatch_is_invalid_input() {
        let left = vec![a(0, "银行", "银", Tier::FirstChar)];
        let right = vec![a(0, "银河", "银", Tier::FirstChar)];
        assert!(matches!(
            compare(&left, &right),
            Err(LabelError::InvalidInput { .. })
        ));
    }

    #[test]
    fn empty_runs_agree() {
        let cmp = compare(&[], &[]).unwrap();
        assert_eq!(cmp.total(), 0);
        assert_eq!(cmp.agreement(), 1.0);
    }
}
