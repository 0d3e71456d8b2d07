use lexicard_core::{
    id::{TopicId, UserId},
    models::{Topic, TopicDraft, TopicPatch},
};
use sqlx::{PgConnection, Postgres, QueryBuilder};

use super::InternalTopicModel;
use crate::{QueryError, QueryResult, TryIntoExternalModel};


fn build_topic_update_query(
    owner_id: &UserId,
    topic_id: TopicId,
    values_to_update: TopicPatch,
) -> QueryBuilder<'static, Postgres> {
    let mut update_query_builder = QueryBuilder::new("UPDATE lexicard.topic SET ");

    let mut separated_set_expressions = update_query_builder.separated(", ");
    separated_set_expressions.push("updated_at = now()");

    if let Some(new_label) = values_to_update.label {
        separated_set_expressions.push("label = ");
        separated_set_expressions.push_bind_unseparated(new_label);
    }

    if let Some(new_description) = values_to_update.description {
        separated_set_expressions.push("description = ");
        separated_set_expressions.push_bind_unseparated(new_description);
    }

    if let Some(new_color) = values_to_update.color {
        separated_set_expressions.push("color = ");
        separated_set_expressions.push_bind_unseparated(new_color);
    }

    if let Some(new_icon) = values_to_update.icon {
        separated_set_expressions.push("icon = ");
        separated_set_expressions.push_bind_unseparated(new_icon);
    }


    update_query_builder.push(" WHERE id = ");
    update_query_builder.push_bind(topic_id.into_uuid());
    update_query_builder.push(" AND owner_id = ");
    update_query_builder.push_bind(owner_id.as_str().to_string());

    update_query_builder
}



pub struct TopicMutation;

impl TopicMutation {
    /// Inserts a new topic. The identifier and timestamps are assigned by the database.
    pub async fn create(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        topic_draft: TopicDraft,
    ) -> QueryResult<Topic> {
        let newly_created_topic = sqlx::query_as::<_, InternalTopicModel>(
            "INSERT INTO lexicard.topic \
                (owner_id, label, description, color, icon) \
                VALUES ($1, $2, $3, $4, $5) \
                RETURNING \
                    id, owner_id, label, description, color, icon, \
                    created_at, updated_at",
        )
        .bind(owner_id.as_str())
        .bind(topic_draft.label)
        .bind(topic_draft.description)
        .bind(topic_draft.color)
        .bind(topic_draft.icon)
        .fetch_one(database_connection)
        .await?;

        newly_created_topic.try_into_external_model()
    }

    /// Returns `false` if the owner has no such topic.
    pub async fn update(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        topic_id: TopicId,
        values_to_update: TopicPatch,
    ) -> QueryResult<bool> {
        if !values_to_update.has_any_values_to_update() {
            return Ok(true);
        }

        let mut update_query_builder =
            build_topic_update_query(owner_id, topic_id, values_to_update);

        let query_result = update_query_builder
            .build()
            .execute(database_connection)
            .await?;

        Ok(query_result.rows_affected() == 1)
    }

    /// Returns `false` if the owner has no such topic.
    pub async fn delete(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        topic_id: TopicId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query(
            "DELETE FROM lexicard.topic \
                WHERE id = $1 AND owner_id = $2",
        )
        .bind(topic_id.into_uuid())
        .bind(owner_id.as_str())
        .execute(database_connection)
        .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "attempted to delete a topic by ID, but more than one row matched",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn update_query_only_sets_patched_columns() {
        let owner_id = UserId::new("account-1").unwrap();

        let query_builder = build_topic_update_query(
            &owner_id,
            TopicId::generate(),
            TopicPatch {
                label: Some("Travel".to_string()),
                description: Some(None),
                ..Default::default()
            },
        );

        assert_eq!(
            query_builder.sql(),
            "UPDATE lexicard.topic SET updated_at = now(), label = $1, description = $2 \
             WHERE id = $3 AND owner_id = $4"
        );
    }
}
