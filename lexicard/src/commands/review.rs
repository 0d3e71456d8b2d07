use lexicard_core::id::TopicId;
use miette::Result;

use super::{report_failure, Prompt};
use crate::{
    review::{ReviewAnswer, ReviewSession},
    session::SessionContext,
};


fn empty_deck_message(filtered_by_topic: bool, limit: Option<usize>) -> &'static str {
    if limit == Some(0) {
        "Review limit is 0, nothing to review."
    } else if filtered_by_topic {
        "No unlearned words in this topic to review."
    } else {
        "No unlearned words to review."
    }
}


pub(super) async fn run_review(
    context: &SessionContext,
    topic_id: Option<TopicId>,
    limit: Option<usize>,
) -> Result<()> {
    let mut session = ReviewSession::start(
        context.vocabulary(),
        topic_id,
        limit,
        &mut rand::thread_rng(),
    );

    if session.is_finished() {
        println!("{}", empty_deck_message(topic_id.is_some(), limit));
        return Ok(());
    }

    let mut prompt = Prompt::new();

    while let Some(card) = session.current() {
        let summary = session.summary();
        println!();
        println!(
            "[{}/{}] {}",
            summary.learned + summary.still_learning + 1,
            summary.total,
            card.word
        );

        if prompt.ask("Press Enter to reveal the meaning. ").await?.is_none() {
            break;
        }

        println!("  = {}", card.meaning);
        if let Some(example) = &card.example {
            println!("  e.g. \"{}\"", example);
        }

        let answer = match prompt
            .ask("Did you know it? [y]es / [n]o / [q]uit ")
            .await?
            .as_deref()
        {
            Some("y") | Some("yes") => ReviewAnswer::Learned,
            Some("n") | Some("no") | Some("") => ReviewAnswer::StillLearning,
            _ => break,
        };

        if let Some((answered_card, patch)) = session.answer(answer) {
            if let Err(error) = context.update_word(answered_card.id, patch).await {
                report_failure(error);
            }
        }
    }

    let summary = session.summary();
    println!();
    println!(
        "Learned {}, still learning {}, skipped {}.",
        summary.learned,
        summary.still_learning,
        summary.remaining()
    );

    Ok(())
}
