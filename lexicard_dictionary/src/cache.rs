use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::normalize::NormalizedWordData;


/// Outcome of a previous lookup, remembered for the lifetime of the cache.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CachedLookup {
    Found(Arc<NormalizedWordData>),

    /// The dictionary does not know this word. Remembered so it is never asked again.
    NotFound,
}


/// Dictionary lookup cache, keyed by normalized (lowercased) word.
///
/// Entries are never evicted: the cache lives exactly as long as its owner
/// (usually the application state) and can be [`clear`][Self::clear]ed explicitly.
/// Failed lookups (network errors and the like) are not cached.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: RwLock<HashMap<String, CachedLookup>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, normalized_word: &str) -> Option<CachedLookup> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still usable.
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        entries.get(normalized_word).cloned()
    }

    pub fn insert(&self, normalized_word: String, lookup: CachedLookup) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        entries.insert(normalized_word, lookup);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}
