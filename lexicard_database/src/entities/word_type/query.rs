use lexicard_core::{id::UserId, models::WordType};
use sqlx::PgConnection;

use super::InternalWordTypeModel;
use crate::{entities::try_into_external_models, QueryResult};


pub struct WordTypeQuery;

impl WordTypeQuery {
    pub async fn get_all_by_owner(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
    ) -> QueryResult<Vec<WordType>> {
        let internal_word_types = sqlx::query_as::<_, InternalWordTypeModel>(
            "SELECT id, owner_id, name, color, created_at, updated_at \
                FROM lexicard.word_type \
                WHERE owner_id = $1 \
                ORDER BY created_at DESC",
        )
        .bind(owner_id.as_str())
        .fetch_all(database_connection)
        .await?;

        try_into_external_models(internal_word_types)
    }
}
