use lexicard_core::{
    models::{VocabularyDraft, VocabularyPatch},
    patch::parse_patch,
};
use miette::{Context, IntoDiagnostic, Result};
use tracing::debug;

use super::{confirm_deletion, report_failure};
use crate::{cli::WordCommand, session::SessionContext, vocabulary::describe_item};


/// Parses a partial update typed in as JSON. Identity fields in it are ignored.
fn parse_word_patch(patch: &str) -> Result<VocabularyPatch> {
    let value: serde_json::Value = serde_json::from_str(patch)
        .into_diagnostic()
        .wrap_err("The update is not valid JSON.")?;

    let parsed = parse_patch::<VocabularyPatch>(value)
        .into_diagnostic()
        .wrap_err("The update does not describe a word.")?;

    if !parsed.dropped_fields.is_empty() {
        debug!(
            dropped_fields = ?parsed.dropped_fields,
            "Ignoring identity fields in word update."
        );
    }

    Ok(parsed.patch)
}


pub(super) async fn run_word_command(context: &SessionContext, command: WordCommand) -> Result<()> {
    match command {
        WordCommand::List { topic, search } => {
            // There is nothing left to type, so the query applies right away.
            context.search().apply_now(search.unwrap_or_default());

            let visible_items = context.visible_vocabulary(topic);
            if visible_items.is_empty() {
                println!("No words found.");
            }

            for item in visible_items {
                println!("{}", describe_item(item));
            }
        }
        WordCommand::Add {
            word,
            meaning,
            example,
            topic,
            no_lookup,
        } => {
            let mut draft = VocabularyDraft::new(word.trim(), meaning.trim());
            draft.example = example;
            draft.topic_id = topic;

            match context.add_word(draft, !no_lookup).await {
                Ok(item) => println!("Added {}", describe_item(&item)),
                Err(error) => report_failure(error),
            }
        }
        WordCommand::Update { id, patch } => {
            let patch = parse_word_patch(&patch)?;

            if !patch.has_any_values_to_update() {
                println!("Nothing to update.");
                return Ok(());
            }

            match context.update_word(id, patch).await {
                Ok(()) => println!("Word updated."),
                Err(error) => report_failure(error),
            }
        }
        WordCommand::Learned { id, undo } => match context.set_learned(id, !undo).await {
            Ok(()) if undo => println!("Word marked as not learned."),
            Ok(()) => println!("Word marked as learned."),
            Err(error) => report_failure(error),
        },
        WordCommand::Pin { id, undo } => match context.set_pinned(id, !undo).await {
            Ok(()) if undo => println!("Word unpinned."),
            Ok(()) => println!("Word pinned."),
            Err(error) => report_failure(error),
        },
        WordCommand::Delete { id, confirmation } => {
            let label = context
                .vocabulary()
                .iter()
                .find(|item| item.id == id)
                .map(|item| format!("\"{}\"", item.word))
                .unwrap_or_else(|| format!("word {}", id));

            if !confirm_deletion(&label, &confirmation).await? {
                return Ok(());
            }

            match context.delete_word(id).await {
                Ok(()) => println!("Deleted {}.", label),
                Err(error) => report_failure(error),
            }
        }
    }

    Ok(())
}
