use lexicard_core::models::{WordTypeDraft, WordTypePatch};
use miette::Result;

use super::{confirm_deletion, report_failure};
use crate::{cli::WordTypeCommand, session::SessionContext};


pub(super) async fn run_word_type_command(
    context: &SessionContext,
    command: WordTypeCommand,
) -> Result<()> {
    match command {
        WordTypeCommand::List => {
            if context.word_types().is_empty() {
                println!("No word types yet.");
            }

            for word_type in context.word_types() {
                println!("{} {} [{}]", word_type.id, word_type.name, word_type.color);
            }
        }
        WordTypeCommand::Add { name, color } => {
            match context
                .add_word_type(WordTypeDraft::new(name.trim(), color))
                .await
            {
                Ok(word_type) => println!("Added word type {} ({}).", word_type.name, word_type.id),
                Err(error) => report_failure(error),
            }
        }
        WordTypeCommand::Update { id, name, color } => {
            let patch = WordTypePatch { name, color };

            if !patch.has_any_values_to_update() {
                println!("Nothing to update.");
                return Ok(());
            }

            match context.update_word_type(id, patch).await {
                Ok(()) => println!("Word type updated."),
                Err(error) => report_failure(error),
            }
        }
        WordTypeCommand::Delete { id, confirmation } => {
            if !confirm_deletion(&format!("word type {}", id), &confirmation).await? {
                return Ok(());
            }

            match context.delete_word_type(id).await {
                Ok(()) => println!("Word type deleted."),
                Err(error) => report_failure(error),
            }
        }
    }

    Ok(())
}
