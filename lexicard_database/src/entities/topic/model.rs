use chrono::{DateTime, Utc};
use lexicard_core::{id::TopicId, models::Topic};
use uuid::Uuid;

use crate::{entities::owner_from_column, QueryError, TryIntoExternalModel};


#[derive(sqlx::FromRow)]
pub(crate) struct InternalTopicModel {
    pub(crate) id: Uuid,

    pub(crate) owner_id: String,

    pub(crate) label: String,

    pub(crate) description: Option<String>,

    pub(crate) color: Option<String>,

    pub(crate) icon: Option<String>,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) updated_at: DateTime<Utc>,
}

impl TryIntoExternalModel for InternalTopicModel {
    type ExternalModel = Topic;
    type Error = QueryError;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error> {
        let owner = owner_from_column(self.owner_id)?;

        Ok(Self::ExternalModel {
            id: TopicId::new(self.id),
            label: self.label,
            description: self.description,
            color: self.color,
            icon: self.icon,
            owner,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
