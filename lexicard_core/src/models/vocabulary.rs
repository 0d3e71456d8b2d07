use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    id::{TopicId, VocabularyItemId},
    normalize::normalize_word,
    owner::Owner,
    OwnedEntity,
};


/// Accent a phonetic transcription belongs to.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Us,
    Uk,
    Au,
    Unknown,
}

impl Accent {
    /// Infers the accent from a pronunciation audio URL.
    ///
    /// The dictionary API names its audio files `{word}-us.mp3`, `{word}-uk.mp3`
    /// and `{word}-au.mp3`; anything else is [`Accent::Unknown`].
    pub fn from_audio_url(audio_url: &str) -> Self {
        let file_stem = audio_url
            .rsplit('/')
            .next()
            .unwrap_or(audio_url)
            .trim_end_matches(".mp3")
            .to_ascii_lowercase();

        if file_stem.ends_with("-us") {
            Accent::Us
        } else if file_stem.ends_with("-uk") {
            Accent::Uk
        } else if file_stem.ends_with("-au") {
            Accent::Au
        } else {
            Accent::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Accent::Us => "US",
            Accent::Uk => "UK",
            Accent::Au => "AU",
            Accent::Unknown => "?",
        }
    }
}


/// A single phonetic transcription, tagged by accent.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Phonetic {
    pub accent: Accent,

    /// IPA transcription, e.g. `/həˈləʊ/`.
    pub text: Option<String>,

    #[serde(default)]
    pub audio_url: Option<String>,
}


/// A single vocabulary word with its meaning.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: VocabularyItemId,

    pub word: String,

    /// Normalized form of `word` (see [`normalize_word`]). Only used for duplicate detection.
    pub normalized_word: String,

    /// Translated meaning of the word.
    pub meaning: String,

    #[serde(default)]
    pub example: Option<String>,

    #[serde(default)]
    pub phonetics: Vec<Phonetic>,

    #[serde(default)]
    pub parts_of_speech: Vec<String>,

    #[serde(default)]
    pub learned: bool,

    #[serde(default)]
    pub pinned: bool,

    #[serde(default)]
    pub shared: bool,

    #[serde(default)]
    pub topic_id: Option<TopicId>,

    #[serde(rename = "ownerId")]
    pub owner: Owner,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl VocabularyItem {
    /// Case-insensitive match against the word, its normalized form and its meaning.
    pub fn matches_query(&self, normalized_query: &str) -> bool {
        if normalized_query.is_empty() {
            return true;
        }

        self.normalized_word.contains(normalized_query)
            || self.meaning.to_lowercase().contains(normalized_query)
    }
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VocabularyDraft {
    pub word: String,
    pub meaning: String,
    pub example: Option<String>,
    pub phonetics: Vec<Phonetic>,
    pub parts_of_speech: Vec<String>,
    pub learned: bool,
    pub pinned: bool,
    pub shared: bool,
    pub topic_id: Option<TopicId>,
}

impl VocabularyDraft {
    pub fn new<W, M>(word: W, meaning: M) -> Self
    where
        W: Into<String>,
        M: Into<String>,
    {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            example: None,
            phonetics: Vec::new(),
            parts_of_speech: Vec::new(),
            learned: false,
            pinned: false,
            shared: false,
            topic_id: None,
        }
    }

    #[inline]
    pub fn normalized_word(&self) -> String {
        normalize_word(&self.word)
    }
}


#[derive(Deserialize, Clone, Default, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct VocabularyPatch {
    /// Changing the word also re-derives its normalized form.
    pub word: Option<String>,

    pub meaning: Option<String>,

    #[serde(with = "::serde_with::rust::double_option")]
    pub example: Option<Option<String>>,

    pub phonetics: Option<Vec<Phonetic>>,

    pub parts_of_speech: Option<Vec<String>>,

    pub learned: Option<bool>,

    pub pinned: Option<bool>,

    pub shared: Option<bool>,

    #[serde(with = "::serde_with::rust::double_option")]
    pub topic_id: Option<Option<TopicId>>,
}

impl VocabularyPatch {
    pub fn has_any_values_to_update(&self) -> bool {
        self.word.is_some()
            || self.meaning.is_some()
            || self.example.is_some()
            || self.phonetics.is_some()
            || self.parts_of_speech.is_some()
            || self.learned.is_some()
            || self.pinned.is_some()
            || self.shared.is_some()
            || self.topic_id.is_some()
    }

    pub fn learned(learned: bool) -> Self {
        Self {
            learned: Some(learned),
            ..Default::default()
        }
    }

    pub fn pinned(pinned: bool) -> Self {
        Self {
            pinned: Some(pinned),
            ..Default::default()
        }
    }
}


impl OwnedEntity for VocabularyItem {
    type Id = VocabularyItemId;
    type Draft = VocabularyDraft;
    type Patch = VocabularyPatch;

    const STORAGE_KEY: &'static str = "lexicard.vocabulary";
    const KIND: &'static str = "vocabulary item";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(
        id: VocabularyItemId,
        owner: Owner,
        created_at: DateTime<Utc>,
        draft: VocabularyDraft,
    ) -> Self {
        let normalized_word = draft.normalized_word();

        Self {
            id,
            word: draft.word,
            normalized_word,
            meaning: draft.meaning,
            example: draft.example,
            phonetics: draft.phonetics,
            parts_of_speech: draft.parts_of_speech,
            learned: draft.learned,
            pinned: draft.pinned,
            shared: draft.shared,
            topic_id: draft.topic_id,
            owner,
            created_at,
            updated_at: created_at,
        }
    }

    fn apply_patch(&mut self, patch: VocabularyPatch, updated_at: DateTime<Utc>) {
        if let Some(word) = patch.word {
            self.normalized_word = normalize_word(&word);
            self.word = word;
        }

        if let Some(meaning) = patch.meaning {
            self.meaning = meaning;
        }

        if let Some(example) = patch.example {
            self.example = example;
        }

        if let Some(phonetics) = patch.phonetics {
            self.phonetics = phonetics;
        }

        if let Some(parts_of_speech) = patch.parts_of_speech {
            self.parts_of_speech = parts_of_speech;
        }

        if let Some(learned) = patch.learned {
            self.learned = learned;
        }

        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }

        if let Some(shared) = patch.shared {
            self.shared = shared;
        }

        if let Some(topic_id) = patch.topic_id {
            self.topic_id = topic_id;
        }

        self.updated_at = updated_at;
    }
}
