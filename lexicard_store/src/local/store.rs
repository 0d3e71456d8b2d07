use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use lexicard_core::{id::EntityId, owner::Owner, sort_newest_first, OwnedEntity};
use tracing::debug;

use super::LocalStorage;
use crate::{subscription::Subscription, EntityStore, StoreResult};


/// Guest-mode store: keeps all entities of one kind as a JSON array
/// under [`OwnedEntity::STORAGE_KEY`].
///
/// Everything stored here belongs to [`Owner::Guest`] and never leaves the local storage.
pub struct LocalStore<E> {
    storage: Arc<LocalStorage>,

    owner: Owner,

    _entity: PhantomData<fn() -> E>,
}

impl<E> LocalStore<E>
where
    E: OwnedEntity,
{
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self {
            storage,
            owner: Owner::Guest,
            _entity: PhantomData,
        }
    }
}


/// Reads the guest snapshot, applying the simulated latency first.
async fn load_guest_snapshot<E>(storage: &LocalStorage) -> Vec<E>
where
    E: OwnedEntity,
{
    let latency = storage.simulated_latency();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let mut entities: Vec<E> = storage
        .read_array::<E>(E::STORAGE_KEY)
        .await
        .into_iter()
        .filter(|entity| entity.owner().is_guest())
        .collect();

    sort_newest_first(&mut entities);
    entities
}


#[async_trait]
impl<E> EntityStore<E> for LocalStore<E>
where
    E: OwnedEntity,
{
    fn owner(&self) -> &Owner {
        &self.owner
    }

    async fn fetch_all(&self) -> StoreResult<Vec<E>> {
        Ok(load_guest_snapshot(&self.storage).await)
    }

    async fn subscribe(&self) -> StoreResult<Subscription<E>> {
        let storage = self.storage.clone();

        let subscription = Subscription::spawn(E::KIND, move |sender| async move {
            let mut revision = storage.watch(E::STORAGE_KEY);

            loop {
                // Anything written while we are loading will show up as a new revision.
                revision.borrow_and_update();

                let snapshot = load_guest_snapshot::<E>(&storage).await;
                if !sender.send(snapshot) {
                    break;
                }

                if revision.changed().await.is_err() {
                    break;
                }
            }
        });

        Ok(subscription)
    }

    async fn add(&self, draft: E::Draft) -> StoreResult<E> {
        let entity = E::from_draft(E::Id::generate(), Owner::Guest, Utc::now(), draft);
        let stored_entity = entity.clone();

        self.storage
            .modify_array(E::STORAGE_KEY, move |entities: &mut Vec<E>| {
                entities.insert(0, stored_entity);
                true
            })
            .await?;

        debug!(kind = E::KIND, id = %entity.id(), "Stored guest entity.");

        Ok(entity)
    }

    async fn update(&self, id: E::Id, patch: E::Patch) -> StoreResult<()> {
        let updated = self
            .storage
            .modify_array(E::STORAGE_KEY, move |entities: &mut Vec<E>| {
                match entities.iter_mut().find(|entity| entity.id() == id) {
                    Some(entity) => {
                        entity.apply_patch(patch, Utc::now());
                        true
                    }
                    None => false,
                }
            })
            .await?;

        if !updated {
            debug!(kind = E::KIND, id = %id, "No guest entity to update.");
        }

        Ok(())
    }

    async fn delete(&self, id: E::Id) -> StoreResult<()> {
        let deleted = self
            .storage
            .modify_array(E::STORAGE_KEY, move |entities: &mut Vec<E>| {
                let previous_length = entities.len();
                entities.retain(|entity| entity.id() != id);

                entities.len() != previous_length
            })
            .await?;

        if !deleted {
            debug!(kind = E::KIND, id = %id, "No guest entity to delete.");
        }

        Ok(())
    }
}



#[cfg(test)]
mod test {
    use std::time::Duration;

    use lexicard_core::{
        id::TopicId,
        models::{Topic, TopicDraft, TopicPatch, VocabularyDraft, VocabularyItem},
    };

    use super::*;

    fn guest_store<E: OwnedEntity>(directory: &tempfile::TempDir) -> LocalStore<E> {
        LocalStore::new(Arc::new(LocalStorage::new(
            directory.path(),
            1024 * 1024,
            Duration::ZERO,
        )))
    }

    #[tokio::test]
    async fn adding_a_topic_with_only_a_label() {
        let directory = tempfile::tempdir().unwrap();
        let store = guest_store::<Topic>(&directory);

        store.add(TopicDraft::new("Older")).await.unwrap();
        let travel = store.add(TopicDraft::new("Travel")).await.unwrap();

        assert_eq!(travel.label, "Travel");
        assert_eq!(travel.owner, Owner::Guest);
        assert!(!travel.id.to_string().is_empty());
        assert!(travel.created_at <= Utc::now());

        let topics = store.fetch_all().await.unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0], travel);
    }

    #[tokio::test]
    async fn subscription_delivers_snapshots_newest_first() {
        let directory = tempfile::tempdir().unwrap();
        let store = guest_store::<VocabularyItem>(&directory);

        let mut subscription = store.subscribe().await.unwrap();
        assert_eq!(subscription.next_snapshot().await, Some(Vec::new()));

        let hello = store
            .add(VocabularyDraft::new("hello", "zdravo"))
            .await
            .unwrap();

        let snapshot = subscription.next_snapshot().await.unwrap();
        assert_eq!(snapshot.first(), Some(&hello));
        assert!(snapshot[0].owner.is_guest());

        subscription.unsubscribe();
    }

    #[tokio::test]
    async fn update_keeps_identity_fields() {
        let directory = tempfile::tempdir().unwrap();
        let store = guest_store::<Topic>(&directory);

        let topic = store.add(TopicDraft::new("Travel")).await.unwrap();

        let parsed = lexicard_core::patch::parse_patch::<TopicPatch>(serde_json::json!({
            "id": TopicId::generate().to_string(),
            "ownerId": "someone-else",
            "createdAt": "2001-01-01T00:00:00Z",
            "label": "Holidays",
        }))
        .unwrap();

        store.update(topic.id, parsed.patch).await.unwrap();

        let topics = store.fetch_all().await.unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, topic.id);
        assert_eq!(topics[0].owner, Owner::Guest);
        assert_eq!(topics[0].created_at, topic.created_at);
        assert_eq!(topics[0].label, "Holidays");
    }

    #[tokio::test]
    async fn deleting_a_missing_entity_is_a_no_op() {
        let directory = tempfile::tempdir().unwrap();
        let store = guest_store::<Topic>(&directory);

        let topic = store.add(TopicDraft::new("Travel")).await.unwrap();

        store.delete(TopicId::generate()).await.unwrap();
        store
            .update(TopicId::generate(), TopicPatch::default())
            .await
            .unwrap();

        assert_eq!(store.fetch_all().await.unwrap(), vec![topic.clone()]);

        store.delete(topic.id).await.unwrap();
        store.delete(topic.id).await.unwrap();
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reads_are_delayed_by_the_simulated_latency() {
        let directory = tempfile::tempdir().unwrap();
        let store: LocalStore<Topic> = LocalStore::new(Arc::new(LocalStorage::new(
            directory.path(),
            1024,
            Duration::from_millis(300),
        )));

        let started_at = tokio::time::Instant::now();
        store.fetch_all().await.unwrap();

        assert!(started_at.elapsed() >= Duration::from_millis(300));
    }
}
