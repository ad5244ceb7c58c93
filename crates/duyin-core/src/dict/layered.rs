use std::sync::Arc;

use super::PhoneticDictionary;
use crate::reading::Syllable;

/// A dictionary that merges results from multiple layers.
///
/// Later layers have higher priority: their readings come first in
/// `lookup_char` (so their default wins) and their phrase entries shadow
/// earlier ones.
pub struct LayeredDictionary {
    layers: Vec<Arc<dyn PhoneticDictionary>>,
}

impl LayeredDictionary {
    pub fn new(layers: Vec<Arc<dyn PhoneticDictionary>>) -> Self {
        Self { layers }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl PhoneticDictionary for LayeredDictionary {
    fn lookup_char(&self, c: char) -> Vec<Syllable> {
        let mut all = Vec::new();
        for layer in self.layers.iter().rev() {
            for s in layer.lookup_char(c) {
                if !all.contains(&s) {
                    all.push(s);
                }
            }
        }
        all
    }

    fn lookup_phrase(&self, word: &str) -> Option<Vec<Syllable>> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.lookup_phrase(word))
    }
}
