use lexicard_core::{
    id::{UserId, WordTypeId},
    models::{WordType, WordTypeDraft, WordTypePatch},
};
use sqlx::{PgConnection, Postgres, QueryBuilder};

use super::InternalWordTypeModel;
use crate::{QueryError, QueryResult, TryIntoExternalModel};


fn build_word_type_update_query(
    owner_id: &UserId,
    word_type_id: WordTypeId,
    values_to_update: WordTypePatch,
) -> QueryBuilder<'static, Postgres> {
    let mut update_query_builder = QueryBuilder::new("UPDATE lexicard.word_type SET ");

    let mut separated_set_expressions = update_query_builder.separated(", ");
    separated_set_expressions.push("updated_at = now()");

    if let Some(new_name) = values_to_update.name {
        separated_set_expressions.push("name = ");
        separated_set_expressions.push_bind_unseparated(new_name);
    }

    if let Some(new_color) = values_to_update.color {
        separated_set_expressions.push("color = ");
        separated_set_expressions.push_bind_unseparated(new_color);
    }


    update_query_builder.push(" WHERE id = ");
    update_query_builder.push_bind(word_type_id.into_uuid());
    update_query_builder.push(" AND owner_id = ");
    update_query_builder.push_bind(owner_id.as_str().to_string());

    update_query_builder
}



pub struct WordTypeMutation;

impl WordTypeMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        word_type_draft: WordTypeDraft,
    ) -> QueryResult<WordType> {
        let newly_created_word_type = sqlx::query_as::<_, InternalWordTypeModel>(
            "INSERT INTO lexicard.word_type (owner_id, name, color) \
                VALUES ($1, $2, $3) \
                RETURNING id, owner_id, name, color, created_at, updated_at",
        )
        .bind(owner_id.as_str())
        .bind(word_type_draft.name)
        .bind(word_type_draft.color)
        .fetch_one(database_connection)
        .await?;

        newly_created_word_type.try_into_external_model()
    }

    pub async fn update(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        word_type_id: WordTypeId,
        values_to_update: WordTypePatch,
    ) -> QueryResult<bool> {
        if !values_to_update.has_any_values_to_update() {
            return Ok(true);
        }

        let mut update_query_builder =
            build_word_type_update_query(owner_id, word_type_id, values_to_update);

        let query_result = update_query_builder
            .build()
            .execute(database_connection)
            .await?;

        Ok(query_result.rows_affected() == 1)
    }

    pub async fn delete(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        word_type_id: WordTypeId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query(
            "DELETE FROM lexicard.word_type \
                WHERE id = $1 AND owner_id = $2",
        )
        .bind(word_type_id.into_uuid())
        .bind(owner_id.as_str())
        .execute(database_connection)
        .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "attempted to delete a word type by ID, but more than one row matched",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }
}
