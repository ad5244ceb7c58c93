//! Post-assignment collision check.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug_span, warn};

use crate::assign::{Assignment, Tier};
use crate::reading::Reading;

/// What two labels must differ in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CollisionKey {
    Reading(Reading),
    /// Words without pinyin collide only on identical labels.
    Literal(String),
}

impl CollisionKey {
    fn of(a: &Assignment) -> Self {
        match &a.reading {
            Some(r) => CollisionKey::Reading(r.clone()),
            None => CollisionKey::Literal(a.label.clone()),
        }
    }
}

impl std::fmt::Display for CollisionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionKey::Reading(r) => write!(f, "{r}"),
            CollisionKey::Literal(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionGroup {
    pub key: CollisionKey,
    /// `(index, word)` of every colliding word, in input order.
    pub words: Vec<(usize, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub checked: usize,
    /// Excluded words, not checked.
    pub skipped: usize,
    /// Groups ordered by first occurrence.
    pub collisions: Vec<CollisionGroup>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Number of words involved in some collision.
    pub fn colliding_words(&self) -> usize {
        self.collisions.iter().map(|g| g.words.len()).sum()
    }
}

pub fn validate(assignments: &[Assignment]) -> ValidationReport {
    let _span = debug_span!("validate", assignments = assignments.len()).entered();

    let mut report = ValidationReport::default();
    let mut groups: Vec<CollisionGroup> = Vec::new();
    let mut slot: HashMap<CollisionKey, usize> = HashMap::new();

    for a in assignments {
        if a.tier == Tier::Excluded {
            report.skipped += 1;
            continue;
        }
        report.checked += 1;

        let key = CollisionKey::of(a);
        let entry = (a.index, a.word.clone());
        match slot.get(&key) {
            Some(&i) => groups[i].words.push(entry),
            None => {
                slot.insert(key.clone(), groups.len());
                groups.push(CollisionGroup {
                    key,
                    words: vec![entry],
                });
            }
        }
    }

    report.collisions = groups.into_iter().filter(|g| g.words.len() > 1).collect();

    if !report.passed() {
        warn!(
            groups = report.collisions.len(),
            words = report.colliding_words(),
            "labels are not unique"
        );
    }
    report
}
