use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use lexicard_core::{
    id::UserId,
    models::{NewUserProfile, UserProfile},
    roles::ApprovalStatus,
};

use crate::{ProfileRepository, StoreResult};


/// [`ProfileRepository`] that keeps profiles in memory.
///
/// Used in tests and for trying out the administration commands without a database.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<Vec<UserProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
        }
    }

    fn modify_profile<F>(&self, user_id: &UserId, modify: F) -> Option<UserProfile>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profiles = self
            .profiles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let profile = profiles.iter_mut().find(|profile| &profile.id == user_id)?;
        modify(profile);
        profile.updated_at = Utc::now();

        Some(profile.clone())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(&self, user_id: &UserId) -> StoreResult<Option<UserProfile>> {
        let profiles = self
            .profiles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        Ok(profiles
            .iter()
            .find(|profile| &profile.id == user_id)
            .cloned())
    }

    async fn create(&self, new_profile: NewUserProfile) -> StoreResult<UserProfile> {
        let now = Utc::now();

        let profile = UserProfile {
            id: new_profile.id,
            email: new_profile.email,
            display_name: new_profile.display_name,
            photo_url: new_profile.photo_url,
            role: new_profile.role,
            status: new_profile.status,
            created_at: now,
            updated_at: now,
            reviewed_by: None,
            reviewed_at: None,
        };

        self.profiles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(profile.clone());

        Ok(profile)
    }

    async fn refresh_identity_details(
        &self,
        user_id: &UserId,
        email: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> StoreResult<Option<UserProfile>> {
        Ok(self.modify_profile(user_id, |profile| {
            profile.email = email.to_string();
            profile.display_name = display_name.map(str::to_string);
            profile.photo_url = photo_url.map(str::to_string);
        }))
    }

    async fn list(&self, status_filter: Option<ApprovalStatus>) -> StoreResult<Vec<UserProfile>> {
        let profiles = self
            .profiles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut matching_profiles: Vec<UserProfile> = profiles
            .iter()
            .filter(|profile| status_filter.map_or(true, |status| profile.status == status))
            .cloned()
            .collect();

        matching_profiles.sort_by(|first, second| second.created_at.cmp(&first.created_at));

        Ok(matching_profiles)
    }

    async fn set_approval_status(
        &self,
        user_id: &UserId,
        new_status: ApprovalStatus,
        reviewed_by: &UserId,
    ) -> StoreResult<Option<UserProfile>> {
        Ok(self.modify_profile(user_id, |profile| {
            profile.status = new_status;
            profile.reviewed_by = Some(reviewed_by.clone());
            profile.reviewed_at = Some(Utc::now());
        }))
    }
}
