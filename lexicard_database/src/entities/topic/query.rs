use lexicard_core::{id::UserId, models::Topic};
use sqlx::PgConnection;

use super::InternalTopicModel;
use crate::{entities::try_into_external_models, QueryResult};


pub struct TopicQuery;

impl TopicQuery {
    /// Returns all topics of the given owner, newest first.
    pub async fn get_all_by_owner(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
    ) -> QueryResult<Vec<Topic>> {
        let internal_topics = sqlx::query_as::<_, InternalTopicModel>(
            "SELECT \
                    id, owner_id, label, description, color, icon, \
                    created_at, updated_at \
                FROM lexicard.topic \
                WHERE owner_id = $1 \
                ORDER BY created_at DESC",
        )
        .bind(owner_id.as_str())
        .fetch_all(database_connection)
        .await?;

        try_into_external_models(internal_topics)
    }
}
