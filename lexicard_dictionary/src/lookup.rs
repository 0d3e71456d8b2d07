use std::{collections::HashSet, sync::Arc};

use futures_util::future::join_all;
use lexicard_core::normalize::normalize_word;
use tracing::{debug, warn};

use crate::{
    normalize_entries,
    CachedLookup,
    DictionaryApi,
    DictionaryResult,
    FetchOutcome,
    LookupCache,
    NormalizedWordData,
};


/// Cached dictionary lookups.
///
/// Cloning is cheap; clones share the same API client and cache.
#[derive(Clone)]
pub struct DictionaryLookup {
    api: Arc<dyn DictionaryApi>,
    cache: Arc<LookupCache>,
}

impl DictionaryLookup {
    pub fn new(api: Arc<dyn DictionaryApi>) -> Self {
        Self::with_cache(api, Arc::new(LookupCache::new()))
    }

    pub fn with_cache(api: Arc<dyn DictionaryApi>, cache: Arc<LookupCache>) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    /// Looks up a single word.
    ///
    /// Returns `Ok(None)` when the dictionary does not know the word. Both positive
    /// and negative answers are cached; errors are not, so a failed lookup can be retried.
    pub async fn lookup(&self, word: &str) -> DictionaryResult<Option<Arc<NormalizedWordData>>> {
        let normalized_word = normalize_word(word);
        if normalized_word.is_empty() {
            return Ok(None);
        }

        if let Some(cached) = self.cache.get(&normalized_word) {
            debug!(word = %normalized_word, "Dictionary cache hit.");
            return Ok(cached_to_option(cached));
        }

        let cached = self.fetch_and_cache(normalized_word).await?;
        Ok(cached_to_option(cached))
    }

    /// Looks up several words at once.
    ///
    /// Words that are not cached yet are requested concurrently (each distinct word once).
    /// A failing request does not abort the batch: it is logged and the word is
    /// treated as unresolved. The result contains only the words that resolved,
    /// in input order.
    pub async fn lookup_many<S>(&self, words: &[S]) -> Vec<Arc<NormalizedWordData>>
    where
        S: AsRef<str>,
    {
        let normalized_words: Vec<String> = words
            .iter()
            .map(|word| normalize_word(word.as_ref()))
            .collect();

        let mut seen_misses = HashSet::new();
        let misses: Vec<String> = normalized_words
            .iter()
            .filter(|word| !word.is_empty())
            .filter(|word| self.cache.get(word).is_none())
            .filter(|word| seen_misses.insert((*word).clone()))
            .cloned()
            .collect();

        debug!(
            requested = normalized_words.len(),
            misses = misses.len(),
            "Performing batch dictionary lookup."
        );

        let fetches = misses
            .into_iter()
            .map(|word| async move {
                let result = self.fetch_and_cache(word.clone()).await;
                (word, result)
            });

        for (word, result) in join_all(fetches).await {
            if let Err(error) = result {
                warn!(word = %word, error = ?error, "Dictionary lookup failed.");
            }
        }

        normalized_words
            .iter()
            .filter_map(|word| self.cache.get(word))
            .filter_map(cached_to_option)
            .collect()
    }

    async fn fetch_and_cache(&self, normalized_word: String) -> DictionaryResult<CachedLookup> {
        let outcome = self.api.fetch_entries(&normalized_word).await?;

        let cached = match outcome {
            FetchOutcome::Found(entries) => match normalize_entries(entries) {
                Some(data) => CachedLookup::Found(Arc::new(data)),
                None => CachedLookup::NotFound,
            },
            FetchOutcome::NotFound => CachedLookup::NotFound,
        };

        self.cache.insert(normalized_word, cached.clone());

        Ok(cached)
    }
}


fn cached_to_option(cached: CachedLookup) -> Option<Arc<NormalizedWordData>> {
    match cached {
        CachedLookup::Found(data) => Some(data),
        CachedLookup::NotFound => None,
    }
}



#[cfg(test)]
mod test {
    use super::*;
    use crate::MockDictionaryApi;

    fn lookup_with(api: &Arc<MockDictionaryApi>) -> DictionaryLookup {
        DictionaryLookup::new(api.clone())
    }

    #[tokio::test]
    async fn batch_lookup_returns_only_found_words_and_caches_misses() {
        let api = MockDictionaryApi::new()
            .with_word("hello", "A greeting.")
            .into_shared();
        let lookup = lookup_with(&api);

        let first = lookup.lookup_many(&["hello", "xyzzy123"]).await;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].word, "hello");
        assert_eq!(api.request_count(), 2);

        let second = lookup.lookup_many(&["hello", "xyzzy123"]).await;
        assert_eq!(second, first);
        assert_eq!(api.request_count(), 2);
    }

    #[tokio::test]
    async fn repeated_negative_lookup_is_not_requested_again() {
        let api = MockDictionaryApi::new().into_shared();
        let lookup = lookup_with(&api);

        assert_eq!(lookup.lookup("Xyzzy123").await.unwrap(), None);
        assert_eq!(lookup.lookup("xyzzy123").await.unwrap(), None);
        assert_eq!(lookup.lookup("  XYZZY123 ").await.unwrap(), None);

        assert_eq!(api.request_count(), 1);
        assert_eq!(api.requested_words(), vec!["xyzzy123".to_string()]);
    }

    #[tokio::test]
    async fn failures_do_not_abort_the_batch_and_are_not_cached() {
        let api = MockDictionaryApi::new()
            .with_word("apple", "A fruit.")
            .with_word("pear", "Another fruit.")
            .fail_on("banana")
            .into_shared();
        let lookup = lookup_with(&api);

        let found = lookup
            .lookup_many(&["pear", "banana", "apple", "pear"])
            .await;

        let words: Vec<&str> = found.iter().map(|data| data.word.as_str()).collect();
        assert_eq!(words, vec!["pear", "apple", "pear"]);

        // Three distinct words, each requested once.
        assert_eq!(api.request_count(), 3);
        assert!(lookup.cache().get("banana").is_none());

        assert!(lookup.lookup("banana").await.is_err());
        assert_eq!(api.request_count(), 4);
    }

    #[tokio::test]
    async fn clearing_the_cache_forces_new_requests() {
        let api = MockDictionaryApi::new()
            .with_word("hello", "A greeting.")
            .into_shared();
        let lookup = lookup_with(&api);

        assert!(lookup.lookup("hello").await.unwrap().is_some());
        assert_eq!(lookup.cache().len(), 1);

        lookup.cache().clear();
        assert!(lookup.cache().is_empty());

        assert!(lookup.lookup("hello").await.unwrap().is_some());
        assert_eq!(api.request_count(), 2);
    }

    #[tokio::test]
    async fn blank_words_are_never_requested() {
        let api = MockDictionaryApi::new().into_shared();
        let lookup = lookup_with(&api);

        assert_eq!(lookup.lookup("   ").await.unwrap(), None);
        assert!(lookup.lookup_many(&["", "  "]).await.is_empty());
        assert_eq!(api.request_count(), 0);
    }
}
