use std::marker::PhantomData;

use async_trait::async_trait;
use lexicard_core::{id::UserId, owner::Owner, OwnedEntity};
use lexicard_database::ChangeListener;
use sqlx::{pool::PoolConnection, PgPool, Postgres};
use tracing::{debug, warn};

use super::RemoteEntity;
use crate::{
    subscription::{SnapshotSender, Subscription},
    EntityStore,
    StoreError,
    StoreResult,
};


/// Store for authenticated users, backed by PostgreSQL.
///
/// Identifiers and timestamps of new entities are assigned by the database.
/// Subscriptions re-read the owner's entities whenever the database reports
/// a change to them.
pub struct RemoteStore<E> {
    database_pool: PgPool,

    owner_id: UserId,

    owner: Owner,

    _entity: PhantomData<fn() -> E>,
}

impl<E> RemoteStore<E>
where
    E: RemoteEntity,
{
    pub fn new(database_pool: PgPool, owner_id: UserId) -> Self {
        Self {
            database_pool,
            owner: Owner::User(owner_id.clone()),
            owner_id,
            _entity: PhantomData,
        }
    }

    async fn acquire_connection(&self) -> StoreResult<PoolConnection<Postgres>> {
        self.database_pool
            .acquire()
            .await
            .map_err(|error| StoreError::ConnectionError { error })
    }
}


async fn fetch_owner_snapshot<E>(database_pool: &PgPool, owner_id: &UserId) -> StoreResult<Vec<E>>
where
    E: RemoteEntity,
{
    let mut database_connection = database_pool
        .acquire()
        .await
        .map_err(|error| StoreError::ConnectionError { error })?;

    Ok(E::fetch_all_by_owner(&mut database_connection, owner_id).await?)
}


/// Where the task feeding a remote subscription gets its snapshots and changes from.
#[async_trait]
trait SnapshotSource<E>: Send {
    async fn fetch_snapshot(&mut self) -> StoreResult<Vec<E>>;

    /// Waits for the next change. Returns `true` if it calls for a new snapshot.
    async fn next_change(&mut self) -> StoreResult<bool>;
}


struct DatabaseSnapshotSource<E> {
    database_pool: PgPool,

    owner_id: UserId,

    change_listener: ChangeListener,

    _entity: PhantomData<fn() -> E>,
}

#[async_trait]
impl<E> SnapshotSource<E> for DatabaseSnapshotSource<E>
where
    E: RemoteEntity,
{
    async fn fetch_snapshot(&mut self) -> StoreResult<Vec<E>> {
        fetch_owner_snapshot(&self.database_pool, &self.owner_id).await
    }

    async fn next_change(&mut self) -> StoreResult<bool> {
        let change = self.change_listener.next_change().await?;

        Ok(change.concerns(E::TABLE, self.owner_id.as_str()))
    }
}


/// Sends a snapshot now and after every relevant change, until the subscription
/// is released or the change source fails.
///
/// A failed refresh keeps the previous snapshot. If the very first fetch fails,
/// an empty snapshot is sent in its place, so subscribers are never left waiting.
async fn feed_snapshots<E, S>(mut source: S, sender: SnapshotSender<E>)
where
    E: OwnedEntity,
    S: SnapshotSource<E> + 'static,
{
    let mut has_sent_snapshot = false;
    let mut snapshot_is_due = true;

    loop {
        if snapshot_is_due {
            let snapshot = match source.fetch_snapshot().await {
                Ok(snapshot) => Some(snapshot),
                Err(error) => {
                    warn!(
                        kind = E::KIND,
                        error = ?error,
                        "Failed to refresh subscription snapshot."
                    );

                    (!has_sent_snapshot).then(Vec::new)
                }
            };

            if let Some(snapshot) = snapshot {
                if !sender.send(snapshot) {
                    break;
                }

                has_sent_snapshot = true;
            }
        }

        match source.next_change().await {
            Ok(concerns_subscription) => {
                snapshot_is_due = concerns_subscription;
            }
            Err(error) => {
                warn!(
                    kind = E::KIND,
                    error = ?error,
                    "Change listener failed, ending subscription."
                );
                break;
            }
        }
    }
}


#[async_trait]
impl<E> EntityStore<E> for RemoteStore<E>
where
    E: RemoteEntity,
{
    fn owner(&self) -> &Owner {
        &self.owner
    }

    async fn fetch_all(&self) -> StoreResult<Vec<E>> {
        fetch_owner_snapshot(&self.database_pool, &self.owner_id).await
    }

    async fn subscribe(&self) -> StoreResult<Subscription<E>> {
        // Listen before taking the first snapshot, so no change can slip in between.
        let change_listener = ChangeListener::connect(&self.database_pool).await?;

        let source = DatabaseSnapshotSource {
            database_pool: self.database_pool.clone(),
            owner_id: self.owner_id.clone(),
            change_listener,
            _entity: PhantomData,
        };

        debug!(
            kind = E::KIND,
            owner_id = %self.owner_id,
            "Subscribing to remote entities."
        );

        Ok(Subscription::spawn(E::KIND, move |sender| feed_snapshots(source, sender)))
    }

    async fn add(&self, draft: E::Draft) -> StoreResult<E> {
        let mut database_connection = self.acquire_connection().await?;

        let entity = E::create(&mut database_connection, &self.owner_id, draft).await?;

        debug!(
            kind = E::KIND,
            id = %entity.id(),
            owner_id = %self.owner_id,
            "Stored remote entity."
        );

        Ok(entity)
    }

    async fn update(&self, id: E::Id, patch: E::Patch) -> StoreResult<()> {
        let mut database_connection = self.acquire_connection().await?;

        let updated = E::update(&mut database_connection, &self.owner_id, id, patch).await?;
        if !updated {
            debug!(kind = E::KIND, id = %id, "No remote entity to update.");
        }

        Ok(())
    }

    async fn delete(&self, id: E::Id) -> StoreResult<()> {
        let mut database_connection = self.acquire_connection().await?;

        let deleted = E::delete(&mut database_connection, &self.owner_id, id).await?;
        if !deleted {
            debug!(kind = E::KIND, id = %id, "No remote entity to delete.");
        }

        Ok(())
    }
}
