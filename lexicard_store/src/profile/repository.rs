use async_trait::async_trait;
use lexicard_core::{
    id::UserId,
    models::{NewUserProfile, UserProfile},
    roles::ApprovalStatus,
};
use lexicard_database::entities::{UserProfileMutation, UserProfileQuery};
use sqlx::{pool::PoolConnection, PgPool, Postgres};

use crate::{StoreError, StoreResult};


/// Persistence of user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user_id: &UserId) -> StoreResult<Option<UserProfile>>;

    async fn create(&self, new_profile: NewUserProfile) -> StoreResult<UserProfile>;

    /// Refreshes e-mail, display name and photo. Returns `None` if there is no such profile.
    async fn refresh_identity_details(
        &self,
        user_id: &UserId,
        email: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> StoreResult<Option<UserProfile>>;

    /// All profiles, or only those with the given status, newest first.
    async fn list(&self, status_filter: Option<ApprovalStatus>) -> StoreResult<Vec<UserProfile>>;

    /// Returns `None` if there is no such profile.
    async fn set_approval_status(
        &self,
        user_id: &UserId,
        new_status: ApprovalStatus,
        reviewed_by: &UserId,
    ) -> StoreResult<Option<UserProfile>>;
}


/// [`ProfileRepository`] backed by the `user_profile` table.
pub struct RemoteProfileRepository {
    database_pool: PgPool,
}

impl RemoteProfileRepository {
    pub fn new(database_pool: PgPool) -> Self {
        Self { database_pool }
    }

    async fn acquire_connection(&self) -> StoreResult<PoolConnection<Postgres>> {
        self.database_pool
            .acquire()
            .await
            .map_err(|error| StoreError::ConnectionError { error })
    }
}

#[async_trait]
impl ProfileRepository for RemoteProfileRepository {
    async fn find(&self, user_id: &UserId) -> StoreResult<Option<UserProfile>> {
        let mut database_connection = self.acquire_connection().await?;

        Ok(UserProfileQuery::get_by_id(&mut database_connection, user_id).await?)
    }

    async fn create(&self, new_profile: NewUserProfile) -> StoreResult<UserProfile> {
        let mut database_connection = self.acquire_connection().await?;

        Ok(UserProfileMutation::create(&mut database_connection, new_profile).await?)
    }

    async fn refresh_identity_details(
        &self,
        user_id: &UserId,
        email: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> StoreResult<Option<UserProfile>> {
        let mut database_connection = self.acquire_connection().await?;

        Ok(UserProfileMutation::update_identity_details(
            &mut database_connection,
            user_id,
            email,
            display_name,
            photo_url,
        )
        .await?)
    }

    async fn list(&self, status_filter: Option<ApprovalStatus>) -> StoreResult<Vec<UserProfile>> {
        let mut database_connection = self.acquire_connection().await?;

        Ok(UserProfileQuery::get_all(&mut database_connection, status_filter).await?)
    }

    async fn set_approval_status(
        &self,
        user_id: &UserId,
        new_status: ApprovalStatus,
        reviewed_by: &UserId,
    ) -> StoreResult<Option<UserProfile>> {
        let mut database_connection = self.acquire_connection().await?;

        Ok(UserProfileMutation::set_approval_status(
            &mut database_connection,
            user_id,
            new_status,
            reviewed_by,
        )
        .await?)
    }
}
