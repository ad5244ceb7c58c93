pub mod assign;
pub mod classify;
pub mod collection;
pub mod compare;
pub mod dict;
pub mod engine;
pub mod error;
pub mod reading;
pub mod resolver;
pub mod settings;
pub mod stats;
pub mod strategy;
pub mod unicode;
pub mod validate;

#[cfg(test)]
mod testutil;

pub use assign::{Assignment, Tier};
pub use classify::{classify, Word, WordClass};
pub use engine::{LabelEngine, Run, RunPair};
pub use error::LabelError;
pub use reading::{Reading, Syllable, Tone};
pub use strategy::Strategy;
pub use validate::ValidationReport;
