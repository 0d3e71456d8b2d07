use itertools::Itertools;
use lexicard_core::normalize::normalize_word;
use lexicard_dictionary::NormalizedWordData;
use miette::Result;

use crate::state::ApplicationState;


fn print_word_data(word_data: &NormalizedWordData) {
    let phonetics = word_data
        .phonetics
        .iter()
        .filter_map(|phonetic| {
            phonetic
                .text
                .as_ref()
                .map(|text| format!("{} {}", phonetic.accent.label(), text))
        })
        .join(", ");

    if phonetics.is_empty() {
        println!("{}", word_data.word);
    } else {
        println!("{} [{}]", word_data.word, phonetics);
    }

    for definition in &word_data.definitions {
        println!("  ({}) {}", definition.part_of_speech, definition.definition);

        if let Some(example) = &definition.example {
            println!("      e.g. \"{}\"", example);
        }
    }
}


pub(super) async fn look_up_words(state: &ApplicationState, words: &[String]) -> Result<()> {
    let found = state.dictionary.lookup_many(words).await;

    for word_data in &found {
        print_word_data(word_data);
    }

    let not_found = words
        .iter()
        .filter(|word| {
            let normalized_word = normalize_word(word);
            !normalized_word.is_empty()
                && !found
                    .iter()
                    .any(|word_data| normalize_word(&word_data.word) == normalized_word)
        })
        .join(", ");

    if !not_found.is_empty() {
        println!("No dictionary entries for: {}", not_found);
    }

    Ok(())
}
