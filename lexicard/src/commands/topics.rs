use lexicard_core::models::{Topic, TopicDraft, TopicPatch};
use miette::Result;

use super::{confirm_deletion, report_failure};
use crate::{cli::TopicCommand, session::SessionContext};


/// `--option ""` clears an optional value.
pub(super) fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|value| {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}


fn describe_topic(topic: &Topic, word_count: usize) -> String {
    let mut description = format!("{} {} ({} words)", topic.id, topic.label, word_count);

    if let Some(topic_description) = &topic.description {
        description.push_str(&format!(": {}", topic_description));
    }

    description
}


pub(super) async fn run_topic_command(
    context: &SessionContext,
    command: TopicCommand,
) -> Result<()> {
    match command {
        TopicCommand::List => {
            if context.topics().is_empty() {
                println!("No topics yet.");
            }

            for topic in context.topics() {
                let word_count = context
                    .vocabulary()
                    .iter()
                    .filter(|item| item.topic_id == Some(topic.id))
                    .count();

                println!("{}", describe_topic(topic, word_count));
            }
        }
        TopicCommand::Add {
            label,
            description,
            color,
            icon,
        } => {
            let draft = TopicDraft {
                label,
                description: clearable(description).flatten(),
                color: clearable(color).flatten(),
                icon: clearable(icon).flatten(),
            };

            match context.add_topic(draft).await {
                Ok(topic) => println!("Added topic {} ({}).", topic.label, topic.id),
                Err(error) => report_failure(error),
            }
        }
        TopicCommand::Update {
            id,
            label,
            description,
            color,
            icon,
        } => {
            let patch = TopicPatch {
                label,
                description: clearable(description),
                color: clearable(color),
                icon: clearable(icon),
            };

            if !patch.has_any_values_to_update() {
                println!("Nothing to update.");
                return Ok(());
            }

            match context.update_topic(id, patch).await {
                Ok(()) => println!("Topic updated."),
                Err(error) => report_failure(error),
            }
        }
        TopicCommand::Delete { id, confirmation } => {
            let label = context
                .topics()
                .iter()
                .find(|topic| topic.id == id)
                .map(|topic| format!("topic \"{}\"", topic.label))
                .unwrap_or_else(|| format!("topic {}", id));

            if !confirm_deletion(&label, &confirmation).await? {
                return Ok(());
            }

            match context.delete_topic(id).await {
                Ok(detached_words) => println!(
                    "Deleted {}. {} words no longer belong to a topic.",
                    label, detached_words
                ),
                Err(error) => report_failure(error),
            }
        }
    }

    Ok(())
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_option_values_clear_the_field() {
        assert_eq!(clearable(None), None);
        assert_eq!(clearable(Some("  ".to_string())), Some(None));
        assert_eq!(
            clearable(Some(" teal ".to_string())),
            Some(Some("teal".to_string()))
        );
    }
}
