use lexicard_core::{id::UserId, models::VocabularyItem};
use sqlx::PgConnection;

use super::InternalVocabularyItemModel;
use crate::{entities::try_into_external_models, QueryResult};


pub struct VocabularyQuery;

impl VocabularyQuery {
    pub async fn get_all_by_owner(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
    ) -> QueryResult<Vec<VocabularyItem>> {
        let internal_items = sqlx::query_as::<_, InternalVocabularyItemModel>(
            "SELECT \
                    id, owner_id, word, normalized_word, meaning, example, \
                    phonetics, parts_of_speech, learned, pinned, shared, topic_id, \
                    created_at, updated_at \
                FROM lexicard.vocabulary_item \
                WHERE owner_id = $1 \
                ORDER BY created_at DESC",
        )
        .bind(owner_id.as_str())
        .fetch_all(database_connection)
        .await?;

        try_into_external_models(internal_items)
    }
}
