use async_trait::async_trait;
use lexicard_core::{
    id::UserId,
    models::{Topic, VocabularyItem, WordType},
    OwnedEntity,
};
use lexicard_database::{
    entities::{
        TopicMutation,
        TopicQuery,
        VocabularyMutation,
        VocabularyQuery,
        WordTypeMutation,
        WordTypeQuery,
    },
    ChangedTable,
    QueryResult,
};
use sqlx::PgConnection;


/// An entity that has a table in the remote store.
///
/// Bridges the generic [`RemoteStore`][crate::RemoteStore] to the
/// per-entity queries and mutations of `lexicard_database`.
#[async_trait]
pub trait RemoteEntity: OwnedEntity {
    /// Table whose change notifications concern this entity.
    const TABLE: ChangedTable;

    async fn fetch_all_by_owner(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
    ) -> QueryResult<Vec<Self>>;

    async fn create(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        draft: Self::Draft,
    ) -> QueryResult<Self>;

    /// Returns `false` if the owner has no such entity.
    async fn update(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        id: Self::Id,
        patch: Self::Patch,
    ) -> QueryResult<bool>;

    /// Returns `false` if the owner has no such entity.
    async fn delete(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        id: Self::Id,
    ) -> QueryResult<bool>;
}


macro_rules! impl_remote_entity {
    ($entity:ty, $table:expr, $query:ident, $mutation:ident) => {
        #[async_trait]
        impl RemoteEntity for $entity {
            const TABLE: ChangedTable = $table;

            async fn fetch_all_by_owner(
                database_connection: &mut PgConnection,
                owner_id: &UserId,
            ) -> QueryResult<Vec<Self>> {
                $query::get_all_by_owner(database_connection, owner_id).await
            }

            async fn create(
                database_connection: &mut PgConnection,
                owner_id: &UserId,
                draft: Self::Draft,
            ) -> QueryResult<Self> {
                $mutation::create(database_connection, owner_id, draft).await
            }

            async fn update(
                database_connection: &mut PgConnection,
                owner_id: &UserId,
                id: Self::Id,
                patch: Self::Patch,
            ) -> QueryResult<bool> {
                $mutation::update(database_connection, owner_id, id, patch).await
            }

            async fn delete(
                database_connection: &mut PgConnection,
                owner_id: &UserId,
                id: Self::Id,
            ) -> QueryResult<bool> {
                $mutation::delete(database_connection, owner_id, id).await
            }
        }
    };
}

impl_remote_entity!(Topic, ChangedTable::Topic, TopicQuery, TopicMutation);
impl_remote_entity!(WordType, ChangedTable::WordType, WordTypeQuery, WordTypeMutation);
impl_remote_entity!(
    VocabularyItem,
    ChangedTable::VocabularyItem,
    VocabularyQuery,
    VocabularyMutation
);
