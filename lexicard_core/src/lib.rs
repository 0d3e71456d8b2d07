//! Shared types for Lexicard: identifiers, owners, roles and the
//! vocabulary / topic / word type / user profile models.
//!
//! Everything that is stored (locally for guests, remotely for authenticated users)
//! implements [`OwnedEntity`], which is the type-level half of the persistence contract:
//! creation goes through a *draft*, mutation goes through a *patch*, and neither
//! of the two can carry the identity fields (`id`, `owner`, `created_at`).

pub mod id;
pub mod models;
pub mod normalize;
pub mod owner;
pub mod patch;
pub mod roles;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::{id::EntityId, owner::Owner};


/// A user-owned entity that can be persisted by either storage adapter.
pub trait OwnedEntity:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Strongly-typed identifier of this entity.
    type Id: EntityId;

    /// Data required to create a new entity (everything except identity fields).
    type Draft: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// A partial update. Contains no identity fields by construction.
    type Patch: Clone + Default + std::fmt::Debug + DeserializeOwned + Send + Sync + 'static;

    /// Key under which guest-mode data of this kind is kept in local storage.
    const STORAGE_KEY: &'static str;

    /// Human-readable name of this entity kind (used in logs).
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    fn owner(&self) -> &Owner;

    fn created_at(&self) -> DateTime<Utc>;

    /// Builds a full entity out of its draft and the identity fields
    /// the storage adapter generated for it.
    fn from_draft(
        id: Self::Id,
        owner: Owner,
        created_at: DateTime<Utc>,
        draft: Self::Draft,
    ) -> Self;

    /// Applies a partial update, bumping `updated_at`.
    fn apply_patch(&mut self, patch: Self::Patch, updated_at: DateTime<Utc>);
}


/// Sorts entities newest-first by creation time.
///
/// The sort is stable, meaning entities with equal creation times keep their relative order.
pub fn sort_newest_first<E: OwnedEntity>(entities: &mut [E]) {
    entities.sort_by(|first, second| second.created_at().cmp(&first.created_at()));
}
