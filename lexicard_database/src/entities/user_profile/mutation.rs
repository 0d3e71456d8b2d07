use lexicard_core::{
    id::UserId,
    models::{NewUserProfile, UserProfile},
    roles::ApprovalStatus,
};
use sqlx::PgConnection;

use super::InternalUserProfileModel;
use crate::{QueryResult, TryIntoExternalModel};


pub struct UserProfileMutation;

impl UserProfileMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        new_profile: NewUserProfile,
    ) -> QueryResult<UserProfile> {
        let newly_created_profile = sqlx::query_as::<_, InternalUserProfileModel>(
            "INSERT INTO lexicard.user_profile \
                (id, email, display_name, photo_url, role, status) \
                VALUES ($1, $2, $3, $4, $5, $6) \
                RETURNING \
                    id, email, display_name, photo_url, role, status, \
                    created_at, updated_at, reviewed_by, reviewed_at",
        )
        .bind(new_profile.id.as_str())
        .bind(new_profile.email)
        .bind(new_profile.display_name)
        .bind(new_profile.photo_url)
        .bind(new_profile.role.name())
        .bind(new_profile.status.name())
        .fetch_one(database_connection)
        .await?;

        newly_created_profile.try_into_external_model()
    }

    /// Refreshes the details the identity provider reports on every sign-in.
    pub async fn update_identity_details(
        database_connection: &mut PgConnection,
        user_id: &UserId,
        email: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> QueryResult<Option<UserProfile>> {
        let updated_profile = sqlx::query_as::<_, InternalUserProfileModel>(
            "UPDATE lexicard.user_profile \
                SET email = $2, display_name = $3, photo_url = $4, updated_at = now() \
                WHERE id = $1 \
                RETURNING \
                    id, email, display_name, photo_url, role, status, \
                    created_at, updated_at, reviewed_by, reviewed_at",
        )
        .bind(user_id.as_str())
        .bind(email)
        .bind(display_name)
        .bind(photo_url)
        .fetch_optional(database_connection)
        .await?;

        updated_profile
            .map(TryIntoExternalModel::try_into_external_model)
            .transpose()
    }

    /// Records an administrator's approval decision.
    pub async fn set_approval_status(
        database_connection: &mut PgConnection,
        user_id: &UserId,
        new_status: ApprovalStatus,
        reviewed_by: &UserId,
    ) -> QueryResult<Option<UserProfile>> {
        let updated_profile = sqlx::query_as::<_, InternalUserProfileModel>(
            "UPDATE lexicard.user_profile \
                SET status = $2, reviewed_by = $3, reviewed_at = now(), updated_at = now() \
                WHERE id = $1 \
                RETURNING \
                    id, email, display_name, photo_url, role, status, \
                    created_at, updated_at, reviewed_by, reviewed_at",
        )
        .bind(user_id.as_str())
        .bind(new_status.name())
        .bind(reviewed_by.as_str())
        .fetch_optional(database_connection)
        .await?;

        updated_profile
            .map(TryIntoExternalModel::try_into_external_model)
            .transpose()
    }
}
