use chrono::{DateTime, Utc};
use lexicard_core::{
    id::{TopicId, VocabularyItemId},
    models::{Phonetic, VocabularyItem},
};
use sqlx::types::Json;
use uuid::Uuid;

use crate::{entities::owner_from_column, QueryError, TryIntoExternalModel};


#[derive(sqlx::FromRow)]
pub(crate) struct InternalVocabularyItemModel {
    pub(crate) id: Uuid,

    pub(crate) owner_id: String,

    pub(crate) word: String,

    pub(crate) normalized_word: String,

    pub(crate) meaning: String,

    pub(crate) example: Option<String>,

    pub(crate) phonetics: Json<Vec<Phonetic>>,

    pub(crate) parts_of_speech: Vec<String>,

    pub(crate) learned: bool,

    pub(crate) pinned: bool,

    pub(crate) shared: bool,

    pub(crate) topic_id: Option<Uuid>,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) updated_at: DateTime<Utc>,
}

impl TryIntoExternalModel for InternalVocabularyItemModel {
    type ExternalModel = VocabularyItem;
    type Error = QueryError;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error> {
        let owner = owner_from_column(self.owner_id)?;

        Ok(Self::ExternalModel {
            id: VocabularyItemId::new(self.id),
            word: self.word,
            normalized_word: self.normalized_word,
            meaning: self.meaning,
            example: self.example,
            phonetics: self.phonetics.0,
            parts_of_speech: self.parts_of_speech,
            learned: self.learned,
            pinned: self.pinned,
            shared: self.shared,
            topic_id: self.topic_id.map(TopicId::new),
            owner,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
