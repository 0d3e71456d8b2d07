use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    id::UserId,
    roles::{ApprovalStatus, Role},
};


/// Information about a single authenticated user.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Provider-issued account identifier (canonical key).
    pub id: UserId,

    /// E-mail address reported by the identity provider. Unique, but not a key.
    pub email: String,

    pub display_name: Option<String>,

    pub photo_url: Option<String>,

    pub role: Role,

    pub status: ApprovalStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// The administrator that approved or rejected this account.
    pub reviewed_by: Option<UserId>,

    pub reviewed_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.can_review_accounts()
    }

    /// Name to greet the user with: the display name if known, the e-mail otherwise.
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}


/// Data needed to create a profile on first sign-in.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewUserProfile {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub role: Role,
    pub status: ApprovalStatus,
}
