use std::{path::PathBuf, sync::Arc, time::Duration};

use lexicard::{
    review::{ReviewAnswer, ReviewSession},
    session::SessionError,
    state::{ApplicationState, SignIn},
};
use lexicard_configuration::Configuration;
use lexicard_core::{
    models::{TopicDraft, VocabularyDraft},
    owner::Owner,
};
use lexicard_dictionary::{DictionaryLookup, MockDictionaryApi};
use lexicard_store::{LocalStorage, LocalStorageError, Session, StoreError, StoreFactory};
use rand::{rngs::StdRng, SeedableRng};


const GUEST_ONLY_CONFIGURATION: &str = r#"
    [base_paths]
    base_data_directory_path = "/tmp/lexicard-guest-flow"

    [logging]
    console_output_level_filter = "info"
    log_file_output_level_filter = "debug"
    log_file_output_directory = "{BASE_DATA_DIRECTORY}/logs"

    [local_storage]
    directory_path = "{BASE_DATA_DIRECTORY}/local-storage"
"#;


fn guest_state(
    directory: &tempfile::TempDir,
    quota_bytes: u64,
    api: Arc<MockDictionaryApi>,
) -> ApplicationState {
    let configuration =
        Configuration::load_from_str(GUEST_ONLY_CONFIGURATION, PathBuf::from("test.toml"))
            .unwrap();

    ApplicationState {
        store_factory: StoreFactory::new(
            Arc::new(LocalStorage::new(
                directory.path(),
                quota_bytes,
                Duration::ZERO,
            )),
            None,
        ),
        dictionary: DictionaryLookup::new(api),
        database_pool: None,
        identity_verifier: None,
        profile_service: None,
        configuration,
    }
}


#[tokio::test]
async fn guest_can_build_and_review_a_vocabulary() {
    let directory = tempfile::tempdir().unwrap();
    let api = MockDictionaryApi::new()
        .with_word("hello", "A greeting.")
        .with_word("passport", "A travel document.")
        .into_shared();
    let state = guest_state(&directory, 5 * 1024 * 1024, api.clone());

    let sign_in = state.sign_in(None).await;
    assert_eq!(sign_in, SignIn::Guest { notice: None });

    let mut context = state
        .start_session(sign_in.session().unwrap())
        .await
        .unwrap();
    assert_eq!(context.owner(), &Owner::Guest);

    let travel = context.add_topic(TopicDraft::new("Travel")).await.unwrap();
    assert_eq!(travel.label, "Travel");

    let mut draft = VocabularyDraft::new("passport", "potni list");
    draft.topic_id = Some(travel.id);
    let passport = context.add_word(draft, true).await.unwrap();
    assert_eq!(passport.parts_of_speech, vec!["noun"]);

    context
        .add_word(VocabularyDraft::new("hello", "zdravo"), true)
        .await
        .unwrap();

    assert!(matches!(
        context
            .add_word(VocabularyDraft::new("Passport", "potni list"), true)
            .await,
        Err(SessionError::DuplicateWord { .. })
    ));

    while context.vocabulary().len() < 2 || context.topics().is_empty() {
        if !context.sync() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    assert_eq!(context.topics()[0].id, travel.id);
    assert_eq!(context.vocabulary()[0].word, "hello");

    // The dictionary was asked about each word exactly once.
    assert_eq!(api.request_count(), 2);

    let mut review = ReviewSession::start(
        context.vocabulary(),
        Some(travel.id),
        None,
        &mut StdRng::seed_from_u64(3),
    );
    let (card, patch) = review.answer(ReviewAnswer::Learned).unwrap();
    assert_eq!(card.id, passport.id);

    let card_id = card.id;
    context.update_word(card_id, patch).await.unwrap();
    assert!(review.is_finished());

    loop {
        let vocabulary = context.next_vocabulary_change().await.unwrap();
        if vocabulary
            .iter()
            .any(|item| item.id == passport.id && item.learned)
        {
            break;
        }
    }
}


#[tokio::test]
async fn exceeding_the_storage_quota_leaves_data_unchanged() {
    let directory = tempfile::tempdir().unwrap();
    let state = guest_state(&directory, 16, MockDictionaryApi::new().into_shared());

    let mut context = state.start_session(Session::Guest).await.unwrap();

    let result = context.add_topic(TopicDraft::new("Travel")).await;
    assert!(matches!(
        result,
        Err(SessionError::StoreError {
            error: StoreError::LocalStorageError {
                error: LocalStorageError::QuotaExceeded { .. }
            }
        })
    ));

    tokio::time::sleep(Duration::from_millis(20)).await;
    context.sync();
    assert!(context.topics().is_empty());
    assert!(!directory.path().join("lexicard.topics.json").exists());
}
