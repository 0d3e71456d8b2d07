use std::{sync::Arc, time::Duration};

use lexicard_core::{
    id::{TopicId, WordTypeId},
    models::{TopicDraft, VocabularyDraft, VocabularyPatch, WordTypeDraft, WordTypePatch},
    owner::{Owner, GUEST_OWNER_SENTINEL},
    patch::parse_patch,
};
use lexicard_store::{EntityStore, LocalStorage, Session, StoreFactory, Stores};


fn guest_stores(directory: &tempfile::TempDir) -> Stores {
    let local_storage = Arc::new(LocalStorage::new(
        directory.path(),
        5 * 1024 * 1024,
        Duration::ZERO,
    ));

    StoreFactory::new(local_storage, None)
        .stores_for(&Session::Guest)
        .unwrap()
}


#[tokio::test]
async fn guest_data_is_tagged_with_the_sentinel_owner() {
    let directory = tempfile::tempdir().unwrap();
    let stores = guest_stores(&directory);

    let topic = stores.topics.add(TopicDraft::new("Travel")).await.unwrap();

    let mut draft = VocabularyDraft::new("Passport", "potni list");
    draft.topic_id = Some(topic.id);
    let word = stores.vocabulary.add(draft).await.unwrap();

    assert_eq!(word.owner, Owner::Guest);
    assert_eq!(word.normalized_word, "passport");

    // The document on disk carries the sentinel, never a user identifier.
    let raw_document =
        std::fs::read_to_string(directory.path().join("lexicard.vocabulary.json")).unwrap();
    let raw_items: serde_json::Value = serde_json::from_str(&raw_document).unwrap();
    assert_eq!(raw_items[0]["ownerId"], GUEST_OWNER_SENTINEL);
    assert_eq!(raw_items[0]["topicId"], topic.id.to_string());
}


#[tokio::test]
async fn newest_entities_come_first() {
    let directory = tempfile::tempdir().unwrap();
    let stores = guest_stores(&directory);

    let mut added = Vec::new();
    for name in ["noun", "verb", "phrasal verb"] {
        added.push(
            stores
                .word_types
                .add(WordTypeDraft::new(name, None))
                .await
                .unwrap(),
        );
    }

    let word_types = stores.word_types.fetch_all().await.unwrap();
    let names: Vec<&str> = word_types.iter().map(|word_type| word_type.name.as_str()).collect();

    assert_eq!(names, vec!["phrasal verb", "verb", "noun"]);
    assert_eq!(word_types[0].color, "gray");
    assert_ne!(added[0].id, added[1].id);
}


#[tokio::test]
async fn patches_never_change_identity_fields() {
    let directory = tempfile::tempdir().unwrap();
    let stores = guest_stores(&directory);

    let word = stores
        .vocabulary
        .add(VocabularyDraft::new("hello", "zdravo"))
        .await
        .unwrap();
    let word_type = stores
        .word_types
        .add(WordTypeDraft::new("noun", Some("teal".to_string())))
        .await
        .unwrap();

    let vocabulary_patch = parse_patch::<VocabularyPatch>(serde_json::json!({
        "id": "not-an-id",
        "ownerId": "attacker",
        "learned": true,
    }))
    .unwrap();
    assert_eq!(vocabulary_patch.dropped_fields.len(), 2);

    stores
        .vocabulary
        .update(word.id, vocabulary_patch.patch)
        .await
        .unwrap();

    let word_type_patch = parse_patch::<WordTypePatch>(serde_json::json!({
        "id": WordTypeId::generate().to_string(),
        "owner_id": "attacker",
        "created_at": "2000-01-01T00:00:00Z",
        "color": "red",
    }))
    .unwrap();

    stores
        .word_types
        .update(word_type.id, word_type_patch.patch)
        .await
        .unwrap();

    let stored_words = stores.vocabulary.fetch_all().await.unwrap();
    let stored_word = &stored_words[0];
    assert_eq!(stored_word.id, word.id);
    assert_eq!(stored_word.owner, Owner::Guest);
    assert_eq!(stored_word.created_at, word.created_at);
    assert!(stored_word.learned);

    let stored_word_types = stores.word_types.fetch_all().await.unwrap();
    let stored_word_type = &stored_word_types[0];
    assert_eq!(stored_word_type.id, word_type.id);
    assert_eq!(stored_word_type.owner, Owner::Guest);
    assert_eq!(stored_word_type.created_at, word_type.created_at);
    assert_eq!(stored_word_type.color, "red");
}


#[tokio::test]
async fn deleting_unknown_entities_does_not_fail() {
    let directory = tempfile::tempdir().unwrap();
    let stores = guest_stores(&directory);

    stores.topics.delete(TopicId::generate()).await.unwrap();
    assert!(stores.topics.fetch_all().await.unwrap().is_empty());
}
