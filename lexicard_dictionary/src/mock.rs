use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
        Mutex,
    },
};

use async_trait::async_trait;

use crate::{
    response::{RawDefinition, RawEntry, RawMeaning, RawPhonetic},
    DictionaryApi,
    DictionaryError,
    DictionaryResult,
    FetchOutcome,
};


/// In-memory [`DictionaryApi`] implementation for tests and offline use.
///
/// Unknown words answer [`FetchOutcome::NotFound`]; words registered with
/// [`fail_on`][Self::fail_on] answer with [`DictionaryError::Unavailable`].
#[derive(Default)]
pub struct MockDictionaryApi {
    entries: HashMap<String, Vec<RawEntry>>,
    failing_words: HashSet<String>,
    requested_words: Mutex<Vec<String>>,
    request_count: AtomicUsize,
}

impl MockDictionaryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a word with a single noun definition.
    pub fn with_word(self, word: &str, definition: &str) -> Self {
        let entry = RawEntry {
            word: word.to_string(),
            phonetic: Some(format!("/{}/", word)),
            phonetics: vec![RawPhonetic {
                text: Some(format!("/{}/", word)),
                audio: Some(format!("https://audio.invalid/{}-us.mp3", word)),
            }],
            meanings: vec![RawMeaning {
                part_of_speech: "noun".to_string(),
                definitions: vec![RawDefinition {
                    definition: definition.to_string(),
                    example: None,
                }],
            }],
        };

        self.with_entries(word, vec![entry])
    }

    pub fn with_entries(mut self, word: &str, entries: Vec<RawEntry>) -> Self {
        self.entries.insert(word.to_lowercase(), entries);
        self
    }

    pub fn fail_on(mut self, word: &str) -> Self {
        self.failing_words.insert(word.to_lowercase());
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of requests that reached this API so far.
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn requested_words(&self) -> Vec<String> {
        self.requested_words
            .lock()
            .map(|words| words.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DictionaryApi for MockDictionaryApi {
    async fn fetch_entries(&self, normalized_word: &str) -> DictionaryResult<FetchOutcome> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut requested_words) = self.requested_words.lock() {
            requested_words.push(normalized_word.to_string());
        }

        if self.failing_words.contains(normalized_word) {
            return Err(DictionaryError::Unavailable {
                reason: format!("mock failure for \"{}\"", normalized_word),
            });
        }

        Ok(match self.entries.get(normalized_word) {
            Some(entries) => FetchOutcome::Found(entries.clone()),
            None => FetchOutcome::NotFound,
        })
    }
}
