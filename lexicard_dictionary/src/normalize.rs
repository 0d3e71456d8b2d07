use lexicard_core::models::{Accent, Phonetic};
use serde::{Deserialize, Serialize};

use crate::response::RawEntry;


/// A single definition of a word.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub part_of_speech: String,
    pub definition: String,
    pub example: Option<String>,
}


/// Dictionary data reshaped into Lexicard's own schema.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWordData {
    pub word: String,

    /// At most one transcription per accent, ordered US, UK, AU, unknown.
    pub phonetics: Vec<Phonetic>,

    /// Distinct parts of speech in order of first appearance.
    pub parts_of_speech: Vec<String>,

    pub definitions: Vec<Definition>,

    /// The first usage example found in any definition.
    pub example: Option<String>,
}


fn accent_rank(accent: Accent) -> u8 {
    match accent {
        Accent::Us => 0,
        Accent::Uk => 1,
        Accent::Au => 2,
        Accent::Unknown => 3,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}


/// Reshapes raw dictionary entries into [`NormalizedWordData`].
///
/// Returns `None` if the entries contain nothing usable (no entry, or no
/// definitions at all), which callers treat the same as "word not found".
pub fn normalize_entries(entries: Vec<RawEntry>) -> Option<NormalizedWordData> {
    let word = entries.first()?.word.trim().to_string();

    let mut phonetics: Vec<Phonetic> = Vec::new();
    let mut parts_of_speech: Vec<String> = Vec::new();
    let mut definitions: Vec<Definition> = Vec::new();

    for entry in entries {
        let headline_phonetic = non_blank(entry.phonetic);

        for raw_phonetic in entry.phonetics {
            let audio_url = non_blank(raw_phonetic.audio);
            let text = non_blank(raw_phonetic.text).or_else(|| headline_phonetic.clone());

            if text.is_none() && audio_url.is_none() {
                continue;
            }

            let accent = audio_url
                .as_deref()
                .map(Accent::from_audio_url)
                .unwrap_or(Accent::Unknown);

            match phonetics.iter_mut().find(|existing| existing.accent == accent) {
                // Keep the first transcription per accent, but fill in missing audio.
                Some(existing) => {
                    if existing.audio_url.is_none() {
                        existing.audio_url = audio_url;
                    }
                }
                None => phonetics.push(Phonetic {
                    accent,
                    text,
                    audio_url,
                }),
            }
        }

        if phonetics.is_empty() {
            if let Some(headline_phonetic) = headline_phonetic {
                phonetics.push(Phonetic {
                    accent: Accent::Unknown,
                    text: Some(headline_phonetic),
                    audio_url: None,
                });
            }
        }

        for meaning in entry.meanings {
            let part_of_speech = meaning.part_of_speech.trim().to_lowercase();

            if !part_of_speech.is_empty() && !parts_of_speech.contains(&part_of_speech) {
                parts_of_speech.push(part_of_speech.clone());
            }

            for raw_definition in meaning.definitions {
                let definition = raw_definition.definition.trim().to_string();
                if definition.is_empty() {
                    continue;
                }

                definitions.push(Definition {
                    part_of_speech: part_of_speech.clone(),
                    definition,
                    example: non_blank(raw_definition.example),
                });
            }
        }
    }

    if definitions.is_empty() {
        return None;
    }

    phonetics.sort_by_key(|phonetic| accent_rank(phonetic.accent));

    let example = definitions
        .iter()
        .find_map(|definition| definition.example.clone());

    Some(NormalizedWordData {
        word,
        phonetics,
        parts_of_speech,
        definitions,
        example,
    })
}



#[cfg(test)]
mod test {
    use super::*;

    const HELLO_RESPONSE: &str = r#"[
        {
            "word": "hello",
            "phonetic": "/həˈləʊ/",
            "phonetics": [
                { "audio": "https://api.dictionaryapi.dev/media/pronunciations/en/hello-au.mp3" },
                {
                    "text": "/həˈləʊ/",
                    "audio": "https://api.dictionaryapi.dev/media/pronunciations/en/hello-uk.mp3"
                },
                { "text": "/həˈloʊ/", "audio": "" }
            ],
            "meanings": [
                {
                    "partOfSpeech": "noun",
                    "definitions": [
                        { "definition": "\"Hello!\" or an equivalent greeting." }
                    ]
                },
                {
                    "partOfSpeech": "verb",
                    "definitions": [
                        {
                            "definition": "To greet with \"hello\".",
                            "example": "She helloed me from across the street."
                        }
                    ]
                }
            ]
        },
        {
            "word": "hello",
            "meanings": [
                { "partOfSpeech": "Noun", "definitions": [ { "definition": "A greeting." } ] }
            ]
        }
    ]"#;

    #[test]
    fn normalizes_free_dictionary_response() {
        let entries: Vec<RawEntry> = serde_json::from_str(HELLO_RESPONSE).unwrap();
        let normalized = normalize_entries(entries).unwrap();

        assert_eq!(normalized.word, "hello");
        assert_eq!(normalized.parts_of_speech, vec!["noun", "verb"]);
        assert_eq!(normalized.definitions.len(), 3);
        assert_eq!(
            normalized.example.as_deref(),
            Some("She helloed me from across the street.")
        );

        let accents: Vec<Accent> = normalized
            .phonetics
            .iter()
            .map(|phonetic| phonetic.accent)
            .collect();
        assert_eq!(accents, vec![Accent::Uk, Accent::Au, Accent::Unknown]);

        // The AU entry had no text of its own, so it borrows the headline transcription.
        assert_eq!(normalized.phonetics[1].text.as_deref(), Some("/həˈləʊ/"));
        // Empty audio strings are dropped.
        assert_eq!(normalized.phonetics[2].audio_url, None);
    }

    #[test]
    fn entries_without_definitions_are_not_usable() {
        assert_eq!(normalize_entries(Vec::new()), None);

        let entries = vec![RawEntry {
            word: "hmm".to_string(),
            phonetic: Some("/hm/".to_string()),
            phonetics: Vec::new(),
            meanings: Vec::new(),
        }];
        assert_eq!(normalize_entries(entries), None);
    }
}
