use std::borrow::Cow;

use lexicard_core::{models::UserProfile, roles::ApprovalStatus};


/// Whether a signed-in profile may use the application.
///
/// Pending and rejected accounts get a blocking message instead of the main interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    PendingApproval,
    Rejected,
}

impl AccessDecision {
    pub fn for_profile(profile: &UserProfile) -> Self {
        match profile.status {
            ApprovalStatus::Approved => Self::Granted,
            ApprovalStatus::Pending => Self::PendingApproval,
            ApprovalStatus::Rejected => Self::Rejected,
        }
    }

    #[inline]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Text of the blocking screen shown instead of the application, if any.
    pub fn blocking_message(&self, profile: &UserProfile) -> Option<Cow<'static, str>> {
        match self {
            Self::Granted => None,
            Self::PendingApproval => Some(Cow::Owned(format!(
                "Hi {}! Your account is waiting for an administrator to approve it.",
                profile.greeting_name()
            ))),
            Self::Rejected => Some(Cow::Borrowed(
                "Your account request was rejected. \
                Contact an administrator if you think this is a mistake.",
            )),
        }
    }
}
