//! The per-session context: the selected stores, their live snapshots
//! and every action the command-line interface performs on them.

use std::{sync::Arc, time::Duration};

use lexicard_core::{
    id::{TopicId, VocabularyItemId, WordTypeId},
    models::{
        Topic,
        TopicDraft,
        TopicPatch,
        VocabularyDraft,
        VocabularyItem,
        VocabularyPatch,
        WordType,
        WordTypeDraft,
        WordTypePatch,
    },
    owner::Owner,
    OwnedEntity,
};
use lexicard_dictionary::{DictionaryLookup, NormalizedWordData};
use lexicard_store::{
    EntityStore,
    Session,
    StoreError,
    StoreFactory,
    StoreResult,
    Stores,
    Subscription,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    debounce::DebouncedField,
    vocabulary::{enrich_draft, filter_vocabulary, find_duplicate},
};


#[derive(Debug, Error)]
pub enum SessionError {
    #[error("\"{}\" is already in the vocabulary (id {})", .word, .existing_id)]
    DuplicateWord {
        word: String,
        existing_id: VocabularyItemId,
    },

    #[error("store operation failed")]
    StoreError {
        #[from]
        #[source]
        error: StoreError,
    },
}

pub type SessionResult<T, E = SessionError> = Result<T, E>;


/// Logs a failed store operation. The caller's state is left unchanged.
fn logged<T>(action: &'static str, result: StoreResult<T>) -> SessionResult<T> {
    result.map_err(|error| {
        warn!(action = action, error = ?error, "Store operation failed.");
        SessionError::StoreError { error }
    })
}



/// The latest snapshot of one entity kind, kept current by a [`Subscription`].
struct LiveCollection<E>
where
    E: OwnedEntity,
{
    subscription: Option<Subscription<E>>,

    snapshot: Vec<E>,
}

impl<E> LiveCollection<E>
where
    E: OwnedEntity,
{
    /// Subscribes and waits for the initial snapshot.
    ///
    /// If subscribing fails, the collection stays empty.
    async fn start(store: &dyn EntityStore<E>) -> Self {
        let mut subscription = match store.subscribe().await {
            Ok(subscription) => subscription,
            Err(error) => {
                warn!(
                    kind = E::KIND,
                    error = ?error,
                    "Unable to subscribe, continuing without data."
                );

                return Self {
                    subscription: None,
                    snapshot: Vec::new(),
                };
            }
        };

        let snapshot = subscription.next_snapshot().await.unwrap_or_default();

        Self {
            subscription: Some(subscription),
            snapshot,
        }
    }

    fn empty() -> Self {
        Self {
            subscription: None,
            snapshot: Vec::new(),
        }
    }

    /// Takes the most recent snapshot that has already arrived, without waiting.
    fn sync(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };

        match subscription.latest_snapshot() {
            Some(snapshot) => {
                self.snapshot = snapshot;
                true
            }
            None => false,
        }
    }

    /// Waits for the next snapshot. Returns `false` once the subscription has ended.
    async fn changed(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };

        match subscription.next_snapshot().await {
            Some(snapshot) => {
                self.snapshot = snapshot;
                true
            }
            None => {
                debug!(kind = E::KIND, "Subscription ended.");
                self.subscription = None;
                false
            }
        }
    }
}



/// Everything one session works with.
///
/// The stores are picked by the [`StoreFactory`] for the active [`Session`]; switching
/// sessions releases every subscription of the previous one before subscribing anew.
pub struct SessionContext {
    session: Session,

    stores: Stores,

    dictionary: DictionaryLookup,

    topics: LiveCollection<Topic>,

    vocabulary: LiveCollection<VocabularyItem>,

    word_types: LiveCollection<WordType>,

    search: DebouncedField<String>,
}

impl SessionContext {
    pub async fn start(
        factory: &StoreFactory,
        session: Session,
        dictionary: DictionaryLookup,
        search_debounce: Duration,
    ) -> SessionResult<Self> {
        let stores = factory.stores_for(&session)?;

        let mut context = Self {
            session,
            stores,
            dictionary,
            topics: LiveCollection::empty(),
            vocabulary: LiveCollection::empty(),
            word_types: LiveCollection::empty(),
            search: DebouncedField::new(String::new(), search_debounce),
        };

        context.subscribe_all().await;

        Ok(context)
    }

    async fn subscribe_all(&mut self) {
        // Assigning drops (and thereby releases) the previous subscriptions.
        self.topics = LiveCollection::start(self.stores.topics.as_ref()).await;
        self.vocabulary = LiveCollection::start(self.stores.vocabulary.as_ref()).await;
        self.word_types = LiveCollection::start(self.stores.word_types.as_ref()).await;

        info!(
            owner = self.stores.owner().as_str(),
            topics = self.topics.snapshot.len(),
            vocabulary = self.vocabulary.snapshot.len(),
            word_types = self.word_types.snapshot.len(),
            "Session data loaded."
        );
    }

    /// Switches to another session (e.g. signing in after using the application as a guest).
    ///
    /// If the new session can not get stores, the current one stays active.
    pub async fn switch_session(
        &mut self,
        factory: &StoreFactory,
        session: Session,
    ) -> SessionResult<()> {
        let stores = factory.stores_for(&session)?;

        self.topics = LiveCollection::empty();
        self.vocabulary = LiveCollection::empty();
        self.word_types = LiveCollection::empty();

        self.session = session;
        self.stores = stores;
        self.search.apply_now(String::new());

        self.subscribe_all().await;

        Ok(())
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn owner(&self) -> &Owner {
        self.stores.owner()
    }

    #[inline]
    pub fn dictionary(&self) -> &DictionaryLookup {
        &self.dictionary
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics.snapshot
    }

    pub fn vocabulary(&self) -> &[VocabularyItem] {
        &self.vocabulary.snapshot
    }

    pub fn word_types(&self) -> &[WordType] {
        &self.word_types.snapshot
    }

    /// Picks up snapshots that arrived since the last call. Returns `true` if anything changed.
    pub fn sync(&mut self) -> bool {
        let topics_changed = self.topics.sync();
        let vocabulary_changed = self.vocabulary.sync();
        let word_types_changed = self.word_types.sync();

        topics_changed || vocabulary_changed || word_types_changed
    }

    /// Waits until the vocabulary changes and returns the new snapshot.
    ///
    /// Returns `None` once the live subscription has ended.
    pub async fn next_vocabulary_change(&mut self) -> Option<&[VocabularyItem]> {
        if self.vocabulary.changed().await {
            Some(&self.vocabulary.snapshot)
        } else {
            None
        }
    }

    pub async fn next_topics_change(&mut self) -> Option<&[Topic]> {
        if self.topics.changed().await {
            Some(&self.topics.snapshot)
        } else {
            None
        }
    }


    /*
     * Search
     */

    #[inline]
    pub fn search(&self) -> &DebouncedField<String> {
        &self.search
    }

    #[inline]
    pub fn search_mut(&mut self) -> &mut DebouncedField<String> {
        &mut self.search
    }

    /// The current vocabulary snapshot, filtered by the applied search query, pinned first.
    pub fn visible_vocabulary(&self, topic_id: Option<TopicId>) -> Vec<&VocabularyItem> {
        filter_vocabulary(&self.vocabulary.snapshot, &self.search.applied(), topic_id)
    }


    /*
     * Topics
     */

    pub async fn add_topic(&self, draft: TopicDraft) -> SessionResult<Topic> {
        logged("add topic", self.stores.topics.add(draft).await)
    }

    pub async fn update_topic(&self, topic_id: TopicId, patch: TopicPatch) -> SessionResult<()> {
        logged("update topic", self.stores.topics.update(topic_id, patch).await)
    }

    /// Deletes a topic. Its words are kept, but no longer belong to any topic.
    ///
    /// Returns the number of detached words.
    pub async fn delete_topic(&self, topic_id: TopicId) -> SessionResult<usize> {
        let vocabulary = logged(
            "load vocabulary",
            self.stores.vocabulary.fetch_all().await,
        )?;

        let mut detached_words = 0;
        for item in vocabulary
            .iter()
            .filter(|item| item.topic_id == Some(topic_id))
        {
            let detach = VocabularyPatch {
                topic_id: Some(None),
                ..Default::default()
            };

            logged(
                "detach word from topic",
                self.stores.vocabulary.update(item.id, detach).await,
            )?;
            detached_words += 1;
        }

        logged("delete topic", self.stores.topics.delete(topic_id).await)?;

        info!(
            topic_id = %topic_id,
            detached_words = detached_words,
            "Topic deleted."
        );

        Ok(detached_words)
    }


    /*
     * Vocabulary
     */

    /// Looks a word up in the dictionary. Lookup failures are logged and treated as "no data".
    pub async fn look_up(&self, word: &str) -> Option<Arc<NormalizedWordData>> {
        match self.dictionary.lookup(word).await {
            Ok(word_data) => word_data,
            Err(error) => {
                warn!(word = word, error = ?error, "Dictionary lookup failed.");
                None
            }
        }
    }

    /// Adds a word, refusing duplicates (by normalized form) of the owner's existing words.
    ///
    /// With `enrich` set, phonetics, parts of speech and a missing example are filled in
    /// from the dictionary. A word the dictionary does not know is stored as typed.
    /// The owner's vocabulary as stored right now, or the last snapshot if it can not be read.
    async fn current_vocabulary(&self) -> Vec<VocabularyItem> {
        match self.stores.vocabulary.fetch_all().await {
            Ok(vocabulary) => vocabulary,
            Err(error) => {
                warn!(
                    error = ?error,
                    "Unable to load vocabulary for duplicate detection, using the last snapshot."
                );
                self.vocabulary.snapshot.clone()
            }
        }
    }

    pub async fn add_word(
        &self,
        mut draft: VocabularyDraft,
        enrich: bool,
    ) -> SessionResult<VocabularyItem> {
        let existing_vocabulary = self.current_vocabulary().await;

        if let Some(existing) = find_duplicate(&existing_vocabulary, &draft.word, None) {
            return Err(SessionError::DuplicateWord {
                word: draft.word,
                existing_id: existing.id,
            });
        }

        if enrich {
            match self.look_up(&draft.word).await {
                Some(word_data) => enrich_draft(&mut draft, &word_data),
                None => debug!(
                    word = %draft.word,
                    "No dictionary data, storing the word as typed."
                ),
            }
        }

        logged("add word", self.stores.vocabulary.add(draft).await)
    }

    /// Applies a partial update. Renaming to a word another item already has is refused.
    pub async fn update_word(
        &self,
        item_id: VocabularyItemId,
        patch: VocabularyPatch,
    ) -> SessionResult<()> {
        if let Some(new_word) = patch.word.as_deref() {
            let existing_vocabulary = self.current_vocabulary().await;

            if let Some(existing) = find_duplicate(&existing_vocabulary, new_word, Some(item_id)) {
                return Err(SessionError::DuplicateWord {
                    word: new_word.to_string(),
                    existing_id: existing.id,
                });
            }
        }

        logged(
            "update word",
            self.stores.vocabulary.update(item_id, patch).await,
        )
    }

    pub async fn set_learned(&self, item_id: VocabularyItemId, learned: bool) -> SessionResult<()> {
        self.update_word(item_id, VocabularyPatch::learned(learned))
            .await
    }

    pub async fn set_pinned(&self, item_id: VocabularyItemId, pinned: bool) -> SessionResult<()> {
        self.update_word(item_id, VocabularyPatch::pinned(pinned))
            .await
    }

    pub async fn delete_word(&self, item_id: VocabularyItemId) -> SessionResult<()> {
        logged("delete word", self.stores.vocabulary.delete(item_id).await)
    }


    /*
     * Word types
     */

    pub async fn add_word_type(&self, draft: WordTypeDraft) -> SessionResult<WordType> {
        logged("add word type", self.stores.word_types.add(draft).await)
    }

    pub async fn update_word_type(
        &self,
        word_type_id: WordTypeId,
        patch: WordTypePatch,
    ) -> SessionResult<()> {
        logged(
            "update word type",
            self.stores.word_types.update(word_type_id, patch).await,
        )
    }

    pub async fn delete_word_type(&self, word_type_id: WordTypeId) -> SessionResult<()> {
        logged(
            "delete word type",
            self.stores.word_types.delete(word_type_id).await,
        )
    }
}



#[cfg(test)]
mod test {
    use lexicard_dictionary::MockDictionaryApi;
    use lexicard_store::LocalStorage;

    use super::*;

    async fn guest_context(
        directory: &tempfile::TempDir,
        api: Arc<MockDictionaryApi>,
    ) -> SessionContext {
        let storage = Arc::new(LocalStorage::new(
            directory.path(),
            64 * 1024,
            Duration::ZERO,
        ));
        let factory = StoreFactory::new(storage, None);

        SessionContext::start(
            &factory,
            Session::Guest,
            DictionaryLookup::new(api),
            Duration::from_millis(300),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn adding_a_word_enriches_it_and_refuses_duplicates() {
        let directory = tempfile::tempdir().unwrap();
        let api = MockDictionaryApi::new()
            .with_word("hello", "A greeting.")
            .into_shared();

        let context = guest_context(&directory, api.clone()).await;
        assert!(context.vocabulary().is_empty());

        let item = context
            .add_word(VocabularyDraft::new("Hello", "zdravo"), true)
            .await
            .unwrap();

        assert_eq!(item.owner, Owner::Guest);
        assert_eq!(item.parts_of_speech, vec!["noun"]);
        assert_eq!(item.phonetics.len(), 1);

        let duplicate = context
            .add_word(VocabularyDraft::new("  HELLO ", "živjo"), true)
            .await;
        assert!(matches!(
            duplicate,
            Err(SessionError::DuplicateWord { existing_id, .. }) if existing_id == item.id
        ));

        // The duplicate check happens before any lookup.
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn renaming_a_word_refuses_duplicates() {
        let directory = tempfile::tempdir().unwrap();
        let context = guest_context(&directory, MockDictionaryApi::new().into_shared()).await;

        let hello = context
            .add_word(VocabularyDraft::new("hello", "zdravo"), false)
            .await
            .unwrap();
        let goodbye = context
            .add_word(VocabularyDraft::new("goodbye", "nasvidenje"), false)
            .await
            .unwrap();

        let rename_to_hello = VocabularyPatch {
            word: Some(" Hello".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            context.update_word(goodbye.id, rename_to_hello.clone()).await,
            Err(SessionError::DuplicateWord { existing_id, .. }) if existing_id == hello.id
        ));

        // Changing only the form of an item's own word is fine.
        context.update_word(hello.id, rename_to_hello).await.unwrap();

        let vocabulary = context.stores.vocabulary.fetch_all().await.unwrap();
        let word_of = |id| {
            vocabulary
                .iter()
                .find(|item| item.id == id)
                .map(|item| item.word.as_str())
        };
        assert_eq!(word_of(hello.id), Some(" Hello"));
        assert_eq!(word_of(goodbye.id), Some("goodbye"));
    }

    #[tokio::test]
    async fn unknown_words_are_stored_as_typed() {
        let directory = tempfile::tempdir().unwrap();
        let api = MockDictionaryApi::new().fail_on("flaky").into_shared();

        let context = guest_context(&directory, api).await;

        let unknown = context
            .add_word(VocabularyDraft::new("xyzzy123", "nothing"), true)
            .await
            .unwrap();
        assert!(unknown.phonetics.is_empty());

        let failed_lookup = context
            .add_word(VocabularyDraft::new("flaky", "nestanoviten"), true)
            .await
            .unwrap();
        assert!(failed_lookup.parts_of_speech.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_topic_detaches_its_words() {
        let directory = tempfile::tempdir().unwrap();
        let mut context = guest_context(&directory, MockDictionaryApi::new().into_shared()).await;

        let travel = context.add_topic(TopicDraft::new("Travel")).await.unwrap();

        let mut draft = VocabularyDraft::new("passport", "potni list");
        draft.topic_id = Some(travel.id);
        let passport = context.add_word(draft, false).await.unwrap();

        context
            .add_word(VocabularyDraft::new("apple", "jabolko"), false)
            .await
            .unwrap();

        let detached_words = context.delete_topic(travel.id).await.unwrap();
        assert_eq!(detached_words, 1);

        // Wait until the vocabulary snapshot shows the detached word.
        loop {
            let snapshot = context.next_vocabulary_change().await.unwrap();
            let detached = snapshot
                .iter()
                .find(|item| item.id == passport.id)
                .is_some_and(|item| item.topic_id.is_none());

            if detached {
                break;
            }
        }

        assert_eq!(context.vocabulary().len(), 2);

        let all_topics = context.stores.topics.fetch_all().await.unwrap();
        assert!(all_topics.is_empty());
    }

    #[tokio::test]
    async fn toggles_flags_and_searches_the_snapshot() {
        let directory = tempfile::tempdir().unwrap();
        let mut context = guest_context(&directory, MockDictionaryApi::new().into_shared()).await;

        let hello = context
            .add_word(VocabularyDraft::new("hello", "zdravo"), false)
            .await
            .unwrap();
        context
            .add_word(VocabularyDraft::new("help", "pomoč"), false)
            .await
            .unwrap();

        context.set_pinned(hello.id, true).await.unwrap();
        context.set_learned(hello.id, true).await.unwrap();

        let vocabulary = context.stores.vocabulary.fetch_all().await.unwrap();
        let stored_hello = vocabulary.iter().find(|item| item.id == hello.id).unwrap();
        assert!(stored_hello.pinned);
        assert!(stored_hello.learned);

        while context.vocabulary().len() < 2
            || !context
                .vocabulary()
                .iter()
                .any(|item| item.id == hello.id && item.learned)
        {
            context.next_vocabulary_change().await.unwrap();
        }

        context.search().apply_now("HEL".to_string());

        let visible: Vec<&str> = context
            .visible_vocabulary(None)
            .into_iter()
            .map(|item| item.word.as_str())
            .collect();
        assert_eq!(visible, vec!["hello", "help"]);
    }

    #[tokio::test]
    async fn switching_sessions_needs_usable_stores() {
        let directory = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(
            directory.path(),
            64 * 1024,
            Duration::ZERO,
        ));
        let factory = StoreFactory::new(storage, None);

        let mut context = SessionContext::start(
            &factory,
            Session::Guest,
            DictionaryLookup::new(MockDictionaryApi::new().into_shared()),
            Duration::from_millis(300),
        )
        .await
        .unwrap();

        let now = chrono::Utc::now();
        let profile = lexicard_core::models::UserProfile {
            id: lexicard_core::id::UserId::new("account-1").unwrap(),
            email: "someone@example.com".to_string(),
            display_name: None,
            photo_url: None,
            role: lexicard_core::roles::Role::User,
            status: lexicard_core::roles::ApprovalStatus::Approved,
            created_at: now,
            updated_at: now,
            reviewed_by: None,
            reviewed_at: None,
        };

        let result = context
            .switch_session(&factory, Session::Authenticated(profile))
            .await;

        assert!(matches!(
            result,
            Err(SessionError::StoreError {
                error: StoreError::RemoteStoreNotConfigured
            })
        ));
        assert_eq!(context.session(), &Session::Guest);
        assert_eq!(context.owner(), &Owner::Guest);
    }
}
