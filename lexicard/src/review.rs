//! Flashcard review sessions.

use lexicard_core::{
    id::TopicId,
    models::{VocabularyItem, VocabularyPatch},
};
use rand::{seq::SliceRandom, Rng};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAnswer {
    /// The card is known: mark the word as learned.
    Learned,

    /// Keep the word in the unlearned pile.
    StillLearning,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewSummary {
    pub total: usize,
    pub learned: usize,
    pub still_learning: usize,
}

impl ReviewSummary {
    #[inline]
    pub fn remaining(&self) -> usize {
        self.total - self.learned - self.still_learning
    }
}


/// A shuffled deck of unlearned words, answered one card at a time.
pub struct ReviewSession {
    cards: Vec<VocabularyItem>,

    position: usize,

    summary: ReviewSummary,
}

impl ReviewSession {
    /// Draws unlearned words (optionally only of one topic) into a shuffled deck
    /// of at most `limit` cards.
    pub fn start<R>(
        vocabulary: &[VocabularyItem],
        topic_id: Option<TopicId>,
        limit: Option<usize>,
        random: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut cards: Vec<VocabularyItem> = vocabulary
            .iter()
            .filter(|item| !item.learned)
            .filter(|item| topic_id.map_or(true, |topic_id| item.topic_id == Some(topic_id)))
            .cloned()
            .collect();

        cards.shuffle(random);

        if let Some(limit) = limit {
            cards.truncate(limit);
        }

        let summary = ReviewSummary {
            total: cards.len(),
            ..Default::default()
        };

        Self {
            cards,
            position: 0,
            summary,
        }
    }

    pub fn current(&self) -> Option<&VocabularyItem> {
        self.cards.get(self.position)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.position >= self.cards.len()
    }

    /// Records the answer to the current card and moves on to the next one.
    ///
    /// Returns the update to persist for the answered word, if any.
    pub fn answer(&mut self, answer: ReviewAnswer) -> Option<(&VocabularyItem, VocabularyPatch)> {
        let card = self.cards.get(self.position)?;
        self.position += 1;

        match answer {
            ReviewAnswer::Learned => {
                self.summary.learned += 1;
                Some((card, VocabularyPatch::learned(true)))
            }
            ReviewAnswer::StillLearning => {
                self.summary.still_learning += 1;
                None
            }
        }
    }

    #[inline]
    pub fn summary(&self) -> ReviewSummary {
        self.summary
    }
}



#[cfg(test)]
mod test {
    use chrono::Utc;
    use lexicard_core::{
        id::VocabularyItemId,
        models::VocabularyDraft,
        owner::Owner,
        OwnedEntity,
    };
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn item(word: &str, learned: bool, topic_id: Option<TopicId>) -> VocabularyItem {
        let mut item = VocabularyItem::from_draft(
            VocabularyItemId::generate(),
            Owner::Guest,
            Utc::now(),
            VocabularyDraft::new(word, "meaning"),
        );
        item.learned = learned;
        item.topic_id = topic_id;
        item
    }

    #[test]
    fn deck_contains_only_unlearned_words_of_the_topic() {
        let travel = TopicId::generate();

        let vocabulary = vec![
            item("passport", false, Some(travel)),
            item("luggage", true, Some(travel)),
            item("ticket", false, Some(travel)),
            item("apple", false, None),
        ];

        let mut random = StdRng::seed_from_u64(7);
        let session = ReviewSession::start(&vocabulary, Some(travel), None, &mut random);

        let mut words: Vec<&str> = session.cards.iter().map(|card| card.word.as_str()).collect();
        words.sort_unstable();

        assert_eq!(words, vec!["passport", "ticket"]);
        assert_eq!(session.summary().total, 2);
    }

    #[test]
    fn answering_counts_and_produces_learned_updates() {
        let vocabulary = vec![
            item("one", false, None),
            item("two", false, None),
            item("three", false, None),
        ];

        let mut random = StdRng::seed_from_u64(1);
        let mut session = ReviewSession::start(&vocabulary, None, Some(2), &mut random);
        assert_eq!(session.summary().total, 2);

        let first_card = session.current().cloned().unwrap();
        let (answered, patch) = session.answer(ReviewAnswer::Learned).unwrap();
        assert_eq!(answered.id, first_card.id);
        assert_eq!(patch.learned, Some(true));

        assert!(session.answer(ReviewAnswer::StillLearning).is_none());
        assert!(session.is_finished());
        assert!(session.answer(ReviewAnswer::Learned).is_none());

        let summary = session.summary();
        assert_eq!(summary.learned, 1);
        assert_eq!(summary.still_learning, 1);
        assert_eq!(summary.remaining(), 0);
    }
}
