use serde::{Deserialize, Serialize};


/// User roles.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Role {
    /// A normal user with access to their own topics and vocabulary.
    #[serde(rename = "user")]
    User,

    /// Can additionally approve or reject new accounts.
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Attempt to parse a [`Role`] from its lower-case name (e.g. "user").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the lower-case name associated with the role.
    pub fn name(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    #[inline]
    pub fn can_review_accounts(&self) -> bool {
        matches!(self, Role::Admin)
    }
}


/// Approval status of an account.
///
/// Only approved accounts get access to the application.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ApprovalStatus {
    #[serde(rename = "pending")]
    Pending,

    #[serde(rename = "approved")]
    Approved,

    #[serde(rename = "rejected")]
    Rejected,
}

impl ApprovalStatus {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(Role::from_name(role.name()), Some(role));
        }

        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
        ] {
            assert_eq!(ApprovalStatus::from_name(status.name()), Some(status));
        }

        assert_eq!(Role::from_name("administrator"), None);
    }
}
