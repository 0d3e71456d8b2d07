use lexicard_core::{
    id::{UserId, VocabularyItemId},
    models::{VocabularyDraft, VocabularyItem, VocabularyPatch},
    normalize::normalize_word,
};
use sqlx::{types::Json, PgConnection, Postgres, QueryBuilder};

use super::InternalVocabularyItemModel;
use crate::{QueryError, QueryResult, TryIntoExternalModel};


fn build_vocabulary_item_update_query(
    owner_id: &UserId,
    item_id: VocabularyItemId,
    values_to_update: VocabularyPatch,
) -> QueryBuilder<'static, Postgres> {
    let mut update_query_builder = QueryBuilder::new("UPDATE lexicard.vocabulary_item SET ");

    let mut separated_set_expressions = update_query_builder.separated(", ");
    separated_set_expressions.push("updated_at = now()");

    if let Some(new_word) = values_to_update.word {
        separated_set_expressions.push("normalized_word = ");
        separated_set_expressions.push_bind_unseparated(normalize_word(&new_word));

        separated_set_expressions.push("word = ");
        separated_set_expressions.push_bind_unseparated(new_word);
    }

    if let Some(new_meaning) = values_to_update.meaning {
        separated_set_expressions.push("meaning = ");
        separated_set_expressions.push_bind_unseparated(new_meaning);
    }

    if let Some(new_example) = values_to_update.example {
        separated_set_expressions.push("example = ");
        separated_set_expressions.push_bind_unseparated(new_example);
    }

    if let Some(new_phonetics) = values_to_update.phonetics {
        separated_set_expressions.push("phonetics = ");
        separated_set_expressions.push_bind_unseparated(Json(new_phonetics));
    }

    if let Some(new_parts_of_speech) = values_to_update.parts_of_speech {
        separated_set_expressions.push("parts_of_speech = ");
        separated_set_expressions.push_bind_unseparated(new_parts_of_speech);
    }

    if let Some(new_learned) = values_to_update.learned {
        separated_set_expressions.push("learned = ");
        separated_set_expressions.push_bind_unseparated(new_learned);
    }

    if let Some(new_pinned) = values_to_update.pinned {
        separated_set_expressions.push("pinned = ");
        separated_set_expressions.push_bind_unseparated(new_pinned);
    }

    if let Some(new_shared) = values_to_update.shared {
        separated_set_expressions.push("shared = ");
        separated_set_expressions.push_bind_unseparated(new_shared);
    }

    if let Some(new_topic_id) = values_to_update.topic_id {
        separated_set_expressions.push("topic_id = ");
        separated_set_expressions.push_bind_unseparated(new_topic_id.map(|id| id.into_uuid()));
    }


    update_query_builder.push(" WHERE id = ");
    update_query_builder.push_bind(item_id.into_uuid());
    update_query_builder.push(" AND owner_id = ");
    update_query_builder.push_bind(owner_id.as_str().to_string());

    update_query_builder
}



pub struct VocabularyMutation;

impl VocabularyMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        item_draft: VocabularyDraft,
    ) -> QueryResult<VocabularyItem> {
        let normalized_word = item_draft.normalized_word();

        let newly_created_item = sqlx::query_as::<_, InternalVocabularyItemModel>(
            "INSERT INTO lexicard.vocabulary_item \
                (owner_id, word, normalized_word, meaning, example, \
                 phonetics, parts_of_speech, learned, pinned, shared, topic_id) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
                RETURNING \
                    id, owner_id, word, normalized_word, meaning, example, \
                    phonetics, parts_of_speech, learned, pinned, shared, topic_id, \
                    created_at, updated_at",
        )
        .bind(owner_id.as_str())
        .bind(item_draft.word)
        .bind(normalized_word)
        .bind(item_draft.meaning)
        .bind(item_draft.example)
        .bind(Json(item_draft.phonetics))
        .bind(item_draft.parts_of_speech)
        .bind(item_draft.learned)
        .bind(item_draft.pinned)
        .bind(item_draft.shared)
        .bind(item_draft.topic_id.map(|id| id.into_uuid()))
        .fetch_one(database_connection)
        .await?;

        newly_created_item.try_into_external_model()
    }

    pub async fn update(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        item_id: VocabularyItemId,
        values_to_update: VocabularyPatch,
    ) -> QueryResult<bool> {
        if !values_to_update.has_any_values_to_update() {
            return Ok(true);
        }

        let mut update_query_builder =
            build_vocabulary_item_update_query(owner_id, item_id, values_to_update);

        let query_result = update_query_builder
            .build()
            .execute(database_connection)
            .await?;

        Ok(query_result.rows_affected() == 1)
    }

    pub async fn delete(
        database_connection: &mut PgConnection,
        owner_id: &UserId,
        item_id: VocabularyItemId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query(
            "DELETE FROM lexicard.vocabulary_item \
                WHERE id = $1 AND owner_id = $2",
        )
        .bind(item_id.into_uuid())
        .bind(owner_id.as_str())
        .execute(database_connection)
        .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "attempted to delete a vocabulary item by ID, but more than one row matched",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }
}
