use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assign::Tier;

/// Disambiguation strategy: which words are in scope, what populates the
/// reading collection, and which tiers a compound walks through.
///
/// | | collection | compound tiers | singles | other words |
/// |-|-|-|-|-|
/// | `FirstChar` (A) | compound heads | first → full | excluded | excluded |
/// | `Union` (B) | heads + tails + singles | first → second → full | identity | identity |
/// | `ContextVote` (C) | heads + singles | first → full | identity, must be distinct | rejected |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[serde(alias = "a")]
    FirstChar,
    #[serde(alias = "b")]
    Union,
    #[serde(alias = "c")]
    ContextVote,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy {0:?} (expected a, b, c, first-char, union or context-vote)")]
pub struct ParseStrategyError(pub String);

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::FirstChar, Strategy::Union, Strategy::ContextVote];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::FirstChar => "first-char",
            Strategy::Union => "union",
            Strategy::ContextVote => "context-vote",
        }
    }

    pub fn letter(self) -> char {
        match self {
            Strategy::FirstChar => 'a',
            Strategy::Union => 'b',
            Strategy::ContextVote => 'c',
        }
    }

    /// Tiers tried for a two-ideograph word, in order.
    pub fn compound_tiers(self) -> &'static [Tier] {
        match self {
            Strategy::FirstChar | Strategy::ContextVote => &[Tier::FirstChar, Tier::FullWord],
            Strategy::Union => &[Tier::FirstChar, Tier::SecondChar, Tier::FullWord],
        }
    }

    /// Tier given to a single-ideograph word.
    pub fn single_tier(self) -> Tier {
        match self {
            Strategy::FirstChar => Tier::Excluded,
            Strategy::Union | Strategy::ContextVote => Tier::Identity,
        }
    }

    /// Tier given to foreign, mixed and other words.
    pub fn passthrough_tier(self) -> Tier {
        match self {
            Strategy::FirstChar => Tier::Excluded,
            Strategy::Union | Strategy::ContextVote => Tier::Identity,
        }
    }

    pub fn collects_singles(self) -> bool {
        matches!(self, Strategy::Union | Strategy::ContextVote)
    }

    pub fn collects_second_chars(self) -> bool {
        matches!(self, Strategy::Union)
    }

    /// Input must be one- or two-ideograph words only, and single
    /// characters must not collide.
    pub fn is_strict(self) -> bool {
        matches!(self, Strategy::ContextVote)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "first-char" => Ok(Strategy::FirstChar),
            "b" | "union" => Ok(Strategy::Union),
            "c" | "context-vote" => Ok(Strategy::ContextVote),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_letters_and_names() {
        assert_eq!("a".parse::<Strategy>().unwrap(), Strategy::FirstChar);
        assert_eq!("B".parse::<Strategy>().unwrap(), Strategy::Union);
        assert_eq!(
            "context-vote".parse::<Strategy>().unwrap(),
            Strategy::ContextVote
        );
        assert!("d".parse::<Strategy>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for s in Strategy::ALL {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
            assert_eq!(s.letter().to_string().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn only_union_has_second_char_tier() {
        assert_eq!(
            Strategy::Union.compound_tiers(),
            &[Tier::FirstChar, Tier::SecondChar, Tier::FullWord]
        );
        assert_eq!(
            Strategy::FirstChar.compound_tiers(),
            &[Tier::FirstChar, Tier::FullWord]
        );
        assert_eq!(
            Strategy::ContextVote.compound_tiers(),
            &[Tier::FirstChar, Tier::FullWord]
        );
    }

    #[test]
    fn scope_flags() {
        assert!(!Strategy::FirstChar.collects_singles());
        assert!(Strategy::Union.collects_second_chars());
        assert!(!Strategy::ContextVote.collects_second_chars());
        assert!(Strategy::ContextVote.is_strict());
        assert_eq!(Strategy::FirstChar.single_tier(), Tier::Excluded);
        assert_eq!(Strategy::Union.passthrough_tier(), Tier::Identity);
    }
}
