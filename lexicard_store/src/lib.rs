//! The persistence contract shared by guest and authenticated sessions.
//!
//! [`EntityStore`] has two implementations: [`LocalStore`] keeps guest data
//! in [`LocalStorage`] (JSON documents on disk), [`RemoteStore`] keeps the
//! data of authenticated users in PostgreSQL. [`StoreFactory`] picks one of
//! them when a session starts, so nothing else needs to know which one is in use.
//!
//! Both implementations return entities newest-first, never apply identity
//! fields from a patch (patches can not express them), and treat deleting
//! a missing entity as a no-op.

mod factory;
mod local;
mod profile;
mod remote;
mod subscription;

use async_trait::async_trait;
pub use factory::*;
use lexicard_core::{owner::Owner, roles::ApprovalStatus, OwnedEntity};
use lexicard_database::QueryError;
pub use local::*;
pub use profile::*;
pub use remote::*;
pub use subscription::*;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local storage error")]
    LocalStorageError {
        #[from]
        #[source]
        error: LocalStorageError,
    },

    #[error("remote store query failed")]
    QueryError {
        #[from]
        #[source]
        error: QueryError,
    },

    #[error("unable to acquire a database connection")]
    ConnectionError {
        #[source]
        error: sqlx::Error,
    },

    #[error("the remote store is not configured, only guest mode is available")]
    RemoteStoreNotConfigured,

    #[error("account is not approved (status: {})", .status.name())]
    AccountNotApproved { status: ApprovalStatus },
}

pub type StoreResult<T, E = StoreError> = Result<T, E>;


/// Persistence operations on the entities of a single owner.
#[async_trait]
pub trait EntityStore<E>: Send + Sync
where
    E: OwnedEntity,
{
    /// The owner all entities of this store belong to.
    fn owner(&self) -> &Owner;

    /// All of the owner's entities, newest first.
    async fn fetch_all(&self) -> StoreResult<Vec<E>>;

    /// Live view of [`fetch_all`][Self::fetch_all]: delivers the current snapshot
    /// immediately, then a new one after every change.
    async fn subscribe(&self) -> StoreResult<Subscription<E>>;

    /// Stores a new entity, returning it with its generated identifier and creation time.
    async fn add(&self, draft: E::Draft) -> StoreResult<E>;

    /// Applies a partial update. Updating a missing entity does nothing.
    async fn update(&self, id: E::Id, patch: E::Patch) -> StoreResult<()>;

    /// Removes an entity. Deleting a missing entity does nothing.
    async fn delete(&self, id: E::Id) -> StoreResult<()>;
}
