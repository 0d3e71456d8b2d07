use std::sync::Arc;

use lexicard_auth::AuthenticatedAccount;
use lexicard_configuration::AdministratorsConfiguration;
use lexicard_core::{
    id::UserId,
    models::{NewUserProfile, UserProfile},
    roles::{ApprovalStatus, Role},
};
use thiserror::Error;
use tracing::info;

use crate::{ProfileRepository, StoreError};


#[derive(Debug, Error)]
pub enum ProfileServiceError {
    #[error("only administrators can review accounts")]
    NotAnAdministrator,

    #[error("administrators can not reject their own account")]
    CannotRejectSelf,

    #[error("no profile with id {}", .user_id)]
    ProfileNotFound { user_id: UserId },

    #[error("profile store error")]
    StoreError {
        #[from]
        #[source]
        error: StoreError,
    },
}

pub type ProfileServiceResult<T, E = ProfileServiceError> = Result<T, E>;


/// Profile provisioning on sign-in and account review by administrators.
#[derive(Clone)]
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,

    administrators: AdministratorsConfiguration,
}

impl ProfileService {
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        administrators: AdministratorsConfiguration,
    ) -> Self {
        Self {
            repository,
            administrators,
        }
    }

    /// Returns the profile of a freshly signed-in account, creating it on first sign-in.
    ///
    /// New accounts with an administrator e-mail are created as approved administrators,
    /// everyone else starts out as a pending user. On later sign-ins the details
    /// reported by the identity provider are refreshed if they changed.
    pub async fn sign_in(
        &self,
        account: &AuthenticatedAccount,
    ) -> ProfileServiceResult<UserProfile> {
        let Some(existing_profile) = self.repository.find(&account.user_id).await? else {
            let is_administrator = self.administrators.is_administrator_email(&account.email);

            let new_profile = NewUserProfile {
                id: account.user_id.clone(),
                email: account.email.clone(),
                display_name: account.display_name.clone(),
                photo_url: account.photo_url.clone(),
                role: if is_administrator {
                    Role::Admin
                } else {
                    Role::User
                },
                status: if is_administrator {
                    ApprovalStatus::Approved
                } else {
                    ApprovalStatus::Pending
                },
            };

            let profile = self.repository.create(new_profile).await?;

            info!(
                user_id = %profile.id,
                role = profile.role.name(),
                status = profile.status.name(),
                "Provisioned new user profile."
            );

            return Ok(profile);
        };

        let details_changed = existing_profile.email != account.email
            || existing_profile.display_name != account.display_name
            || existing_profile.photo_url != account.photo_url;

        if !details_changed {
            return Ok(existing_profile);
        }

        self.repository
            .refresh_identity_details(
                &account.user_id,
                &account.email,
                account.display_name.as_deref(),
                account.photo_url.as_deref(),
            )
            .await?
            .ok_or_else(|| ProfileServiceError::ProfileNotFound {
                user_id: account.user_id.clone(),
            })
    }

    fn ensure_administrator(actor: &UserProfile) -> ProfileServiceResult<()> {
        if actor.is_admin() && actor.status == ApprovalStatus::Approved {
            Ok(())
        } else {
            Err(ProfileServiceError::NotAnAdministrator)
        }
    }

    pub async fn list_profiles(
        &self,
        actor: &UserProfile,
        status_filter: Option<ApprovalStatus>,
    ) -> ProfileServiceResult<Vec<UserProfile>> {
        Self::ensure_administrator(actor)?;

        Ok(self.repository.list(status_filter).await?)
    }

    pub async fn approve(
        &self,
        actor: &UserProfile,
        user_id: &UserId,
    ) -> ProfileServiceResult<UserProfile> {
        self.review(actor, user_id, ApprovalStatus::Approved).await
    }

    pub async fn reject(
        &self,
        actor: &UserProfile,
        user_id: &UserId,
    ) -> ProfileServiceResult<UserProfile> {
        if &actor.id == user_id {
            return Err(ProfileServiceError::CannotRejectSelf);
        }

        self.review(actor, user_id, ApprovalStatus::Rejected).await
    }

    async fn review(
        &self,
        actor: &UserProfile,
        user_id: &UserId,
        new_status: ApprovalStatus,
    ) -> ProfileServiceResult<UserProfile> {
        Self::ensure_administrator(actor)?;

        let reviewed_profile = self
            .repository
            .set_approval_status(user_id, new_status, &actor.id)
            .await?
            .ok_or_else(|| ProfileServiceError::ProfileNotFound {
                user_id: user_id.clone(),
            })?;

        info!(
            user_id = %user_id,
            reviewed_by = %actor.id,
            status = new_status.name(),
            "Account reviewed."
        );

        Ok(reviewed_profile)
    }
}



#[cfg(test)]
mod test {
    use super::*;
    use crate::InMemoryProfileRepository;

    fn account(id: &str, email: &str) -> AuthenticatedAccount {
        AuthenticatedAccount {
            user_id: UserId::new(id).unwrap(),
            email: email.to_string(),
            display_name: Some(id.to_uppercase()),
            photo_url: None,
        }
    }

    fn service() -> ProfileService {
        ProfileService::new(
            Arc::new(InMemoryProfileRepository::new()),
            AdministratorsConfiguration {
                emails: vec!["admin@example.com".to_string()],
            },
        )
    }

    #[tokio::test]
    async fn provisions_administrators_and_pending_users() {
        let service = service();

        let admin = service
            .sign_in(&account("admin-1", "Admin@Example.com"))
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.status, ApprovalStatus::Approved);

        let user = service
            .sign_in(&account("user-1", "user@example.com"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.status, ApprovalStatus::Pending);
    }

    #[tokio::test]
    async fn later_sign_ins_refresh_details_but_keep_status() {
        let service = service();

        let first = service
            .sign_in(&account("user-1", "user@example.com"))
            .await
            .unwrap();

        let mut renamed = account("user-1", "user@example.com");
        renamed.display_name = Some("New Name".to_string());

        let second = service.sign_in(&renamed).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.display_name.as_deref(), Some("New Name"));
        assert_eq!(second.status, ApprovalStatus::Pending);
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn administrators_review_accounts() {
        let service = service();

        let admin = service
            .sign_in(&account("admin-1", "admin@example.com"))
            .await
            .unwrap();
        let user = service
            .sign_in(&account("user-1", "user@example.com"))
            .await
            .unwrap();

        let pending = service
            .list_profiles(&admin, Some(ApprovalStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending, vec![user.clone()]);

        let approved = service.approve(&admin, &user.id).await.unwrap();
        assert_eq!(approved.status, ApprovalStatus::Approved);
        assert_eq!(approved.reviewed_by.as_ref(), Some(&admin.id));
        assert!(approved.reviewed_at.is_some());

        assert!(service
            .list_profiles(&admin, Some(ApprovalStatus::Pending))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn non_administrators_and_self_rejection_are_refused() {
        let service = service();

        let admin = service
            .sign_in(&account("admin-1", "admin@example.com"))
            .await
            .unwrap();
        let user = service
            .sign_in(&account("user-1", "user@example.com"))
            .await
            .unwrap();

        assert!(matches!(
            service.approve(&user, &user.id).await,
            Err(ProfileServiceError::NotAnAdministrator)
        ));
        assert!(matches!(
            service.list_profiles(&user, None).await,
            Err(ProfileServiceError::NotAnAdministrator)
        ));
        assert!(matches!(
            service.reject(&admin, &admin.id).await,
            Err(ProfileServiceError::CannotRejectSelf)
        ));
        assert!(matches!(
            service
                .approve(&admin, &UserId::new("nobody").unwrap())
                .await,
            Err(ProfileServiceError::ProfileNotFound { .. })
        ));
    }
}
