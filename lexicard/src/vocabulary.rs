//! Word enrichment from the dictionary, duplicate detection and search.

use itertools::Itertools;
use lexicard_core::{
    id::{TopicId, VocabularyItemId},
    models::{VocabularyDraft, VocabularyItem},
    normalize::normalize_word,
};
use lexicard_dictionary::NormalizedWordData;


/// Fills in what the dictionary knows about a word.
///
/// Phonetics and parts of speech come from the dictionary; an example
/// is only taken from it if the draft has none.
pub fn enrich_draft(draft: &mut VocabularyDraft, word_data: &NormalizedWordData) {
    if draft.phonetics.is_empty() {
        draft.phonetics = word_data.phonetics.clone();
    }

    if draft.parts_of_speech.is_empty() {
        draft.parts_of_speech = word_data.parts_of_speech.clone();
    }

    if draft.example.is_none() {
        draft.example = word_data.example.clone();
    }
}


/// Returns the existing item whose normalized word matches `word`, if any.
///
/// `ignored_item` is skipped, so an item being renamed does not clash with itself.
pub fn find_duplicate<'v>(
    vocabulary: &'v [VocabularyItem],
    word: &str,
    ignored_item: Option<VocabularyItemId>,
) -> Option<&'v VocabularyItem> {
    let normalized_word = normalize_word(word);

    vocabulary.iter().find(|item| {
        item.normalized_word == normalized_word && Some(item.id) != ignored_item
    })
}


/// Filters a vocabulary snapshot for display.
///
/// Pinned items come first; otherwise the snapshot order (newest first) is kept.
pub fn filter_vocabulary<'v>(
    vocabulary: &'v [VocabularyItem],
    search_query: &str,
    topic_id: Option<TopicId>,
) -> Vec<&'v VocabularyItem> {
    let normalized_query = normalize_word(search_query);

    let (pinned, unpinned): (Vec<&VocabularyItem>, Vec<&VocabularyItem>) = vocabulary
        .iter()
        .filter(|item| topic_id.map_or(true, |topic_id| item.topic_id == Some(topic_id)))
        .filter(|item| item.matches_query(&normalized_query))
        .partition(|item| item.pinned);

    pinned.into_iter().chain(unpinned).collect()
}


/// One-line summary of an item, as printed by the command-line interface.
pub fn describe_item(item: &VocabularyItem) -> String {
    let mut markers = String::new();
    if item.pinned {
        markers.push('*');
    }
    if item.learned {
        markers.push('✓');
    }

    let phonetics = item
        .phonetics
        .iter()
        .filter_map(|phonetic| {
            phonetic
                .text
                .as_ref()
                .map(|text| format!("{} {}", phonetic.accent.label(), text))
        })
        .join(", ");

    let mut description = format!("{} {}{} = {}", item.id, markers, item.word, item.meaning);

    if !phonetics.is_empty() {
        description.push_str(&format!(" [{}]", phonetics));
    }

    if !item.parts_of_speech.is_empty() {
        description.push_str(&format!(" ({})", item.parts_of_speech.join(", ")));
    }

    description
}



#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use lexicard_core::{
        id::VocabularyItemId,
        models::{Accent, Phonetic},
        owner::Owner,
        OwnedEntity,
    };
    use lexicard_dictionary::Definition;

    use super::*;

    fn item(word: &str, meaning: &str, age_in_minutes: i64) -> VocabularyItem {
        VocabularyItem::from_draft(
            VocabularyItemId::generate(),
            Owner::Guest,
            Utc::now() - Duration::minutes(age_in_minutes),
            VocabularyDraft::new(word, meaning),
        )
    }

    #[test]
    fn enrichment_keeps_what_the_user_typed() {
        let word_data = NormalizedWordData {
            word: "hello".to_string(),
            phonetics: vec![Phonetic {
                accent: Accent::Uk,
                text: Some("/həˈləʊ/".to_string()),
                audio_url: None,
            }],
            parts_of_speech: vec!["noun".to_string(), "verb".to_string()],
            definitions: vec![Definition {
                part_of_speech: "noun".to_string(),
                definition: "A greeting.".to_string(),
                example: Some("Hello, everyone.".to_string()),
            }],
            example: Some("Hello, everyone.".to_string()),
        };

        let mut draft = VocabularyDraft::new("Hello", "zdravo");
        draft.example = Some("Hello there!".to_string());

        enrich_draft(&mut draft, &word_data);

        assert_eq!(draft.phonetics.len(), 1);
        assert_eq!(draft.parts_of_speech, vec!["noun", "verb"]);
        assert_eq!(draft.example.as_deref(), Some("Hello there!"));
    }

    #[test]
    fn duplicates_are_found_by_normalized_word() {
        let vocabulary = vec![item("Good  Morning", "dobro jutro", 0)];

        assert!(find_duplicate(&vocabulary, "good morning", None).is_some());
        assert!(find_duplicate(&vocabulary, "good evening", None).is_none());

        // An item never duplicates itself.
        assert!(find_duplicate(&vocabulary, " GOOD morning", Some(vocabulary[0].id)).is_none());
    }

    #[test]
    fn search_puts_pinned_items_first() {
        let mut pinned_old = item("Hello", "zdravo", 30);
        pinned_old.pinned = true;

        let vocabulary = vec![
            item("hell", "pekel", 0),
            item("goodbye", "nasvidenje", 10),
            pinned_old.clone(),
        ];

        let words: Vec<&str> = filter_vocabulary(&vocabulary, " HEL ", None)
            .into_iter()
            .map(|item| item.word.as_str())
            .collect();

        assert_eq!(words, vec!["Hello", "hell"]);
        assert_eq!(filter_vocabulary(&vocabulary, "", None).len(), 3);
        assert_eq!(filter_vocabulary(&vocabulary, "nasvid", None).len(), 1);
    }

    #[test]
    fn search_can_be_limited_to_a_topic() {
        let topic_id = TopicId::generate();

        let mut in_topic = item("passport", "potni list", 0);
        in_topic.topic_id = Some(topic_id);

        let vocabulary = vec![in_topic, item("pass", "prelaz", 1)];

        let found = filter_vocabulary(&vocabulary, "pass", Some(topic_id));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].word, "passport");
    }
}
