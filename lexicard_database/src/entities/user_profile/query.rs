use lexicard_core::{id::UserId, models::UserProfile, roles::ApprovalStatus};
use sqlx::PgConnection;

use super::InternalUserProfileModel;
use crate::{entities::try_into_external_models, QueryResult, TryIntoExternalModel};


pub struct UserProfileQuery;

impl UserProfileQuery {
    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        user_id: &UserId,
    ) -> QueryResult<Option<UserProfile>> {
        let internal_profile = sqlx::query_as::<_, InternalUserProfileModel>(
            "SELECT \
                    id, email, display_name, photo_url, role, status, \
                    created_at, updated_at, reviewed_by, reviewed_at \
                FROM lexicard.user_profile \
                WHERE id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(database_connection)
        .await?;

        internal_profile
            .map(TryIntoExternalModel::try_into_external_model)
            .transpose()
    }

    /// Returns all profiles (optionally only those with the given status), newest first.
    pub async fn get_all(
        database_connection: &mut PgConnection,
        status_filter: Option<ApprovalStatus>,
    ) -> QueryResult<Vec<UserProfile>> {
        let internal_profiles = sqlx::query_as::<_, InternalUserProfileModel>(
            "SELECT \
                    id, email, display_name, photo_url, role, status, \
                    created_at, updated_at, reviewed_by, reviewed_at \
                FROM lexicard.user_profile \
                WHERE ($1::TEXT IS NULL OR status = $1) \
                ORDER BY created_at DESC",
        )
        .bind(status_filter.map(|status| status.name()))
        .fetch_all(database_connection)
        .await?;

        try_into_external_models(internal_profiles)
    }
}
