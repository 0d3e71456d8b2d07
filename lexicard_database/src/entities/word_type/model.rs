use chrono::{DateTime, Utc};
use lexicard_core::{id::WordTypeId, models::WordType};
use uuid::Uuid;

use crate::{entities::owner_from_column, QueryError, TryIntoExternalModel};


#[derive(sqlx::FromRow)]
pub(crate) struct InternalWordTypeModel {
    pub(crate) id: Uuid,

    pub(crate) owner_id: String,

    pub(crate) name: String,

    pub(crate) color: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) updated_at: DateTime<Utc>,
}

impl TryIntoExternalModel for InternalWordTypeModel {
    type ExternalModel = WordType;
    type Error = QueryError;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error> {
        let owner = owner_from_column(self.owner_id)?;

        Ok(Self::ExternalModel {
            id: WordTypeId::new(self.id),
            name: self.name,
            color: self.color,
            owner,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
