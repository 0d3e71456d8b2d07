use chrono::{DateTime, Utc};
use lexicard_core::{
    id::UserId,
    models::UserProfile,
    roles::{ApprovalStatus, Role},
};

use crate::{QueryError, TryIntoExternalModel};


#[derive(sqlx::FromRow)]
pub(crate) struct InternalUserProfileModel {
    pub(crate) id: String,

    pub(crate) email: String,

    pub(crate) display_name: Option<String>,

    pub(crate) photo_url: Option<String>,

    pub(crate) role: String,

    pub(crate) status: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) updated_at: DateTime<Utc>,

    pub(crate) reviewed_by: Option<String>,

    pub(crate) reviewed_at: Option<DateTime<Utc>>,
}

impl TryIntoExternalModel for InternalUserProfileModel {
    type ExternalModel = UserProfile;
    type Error = QueryError;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error> {
        let id = UserId::new(self.id).map_err(|error| {
            QueryError::model_error(format!("invalid user profile id: {}", error))
        })?;

        let role = Role::from_name(&self.role).ok_or_else(|| {
            QueryError::model_error(format!("unrecognized role: {}", self.role))
        })?;

        let status = ApprovalStatus::from_name(&self.status).ok_or_else(|| {
            QueryError::model_error(format!("unrecognized approval status: {}", self.status))
        })?;

        let reviewed_by = self
            .reviewed_by
            .map(UserId::new)
            .transpose()
            .map_err(|error| {
                QueryError::model_error(format!("invalid reviewed_by column: {}", error))
            })?;

        Ok(Self::ExternalModel {
            id,
            email: self.email,
            display_name: self.display_name,
            photo_url: self.photo_url,
            role,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            reviewed_by,
            reviewed_at: self.reviewed_at,
        })
    }
}
