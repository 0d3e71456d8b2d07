use serde::{Deserialize, Serialize};

use crate::id::UserId;


/// Owner tag carried by guest-mode data instead of a real user identifier.
pub const GUEST_OWNER_SENTINEL: &str = "guest";


/// Who an entity belongs to.
///
/// Serialized as a plain string: either the [`GUEST_OWNER_SENTINEL`]
/// or the provider-issued user identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Owner {
    Guest,
    User(UserId),
}

impl Owner {
    #[inline]
    pub fn is_guest(&self) -> bool {
        matches!(self, Owner::Guest)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Owner::Guest => None,
            Owner::User(user_id) => Some(user_id),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Owner::Guest => GUEST_OWNER_SENTINEL,
            Owner::User(user_id) => user_id.as_str(),
        }
    }
}

impl From<String> for Owner {
    fn from(value: String) -> Self {
        // `UserId::new` refuses exactly the values that denote a guest.
        match UserId::new(value) {
            Ok(user_id) => Owner::User(user_id),
            Err(_) => Owner::Guest,
        }
    }
}

impl From<Owner> for String {
    fn from(value: Owner) -> Self {
        match value {
            Owner::Guest => GUEST_OWNER_SENTINEL.to_string(),
            Owner::User(user_id) => user_id.into(),
        }
    }
}

impl From<UserId> for Owner {
    fn from(value: UserId) -> Self {
        Owner::User(value)
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_guest_as_sentinel() {
        let serialized = serde_json::to_string(&Owner::Guest).unwrap();
        assert_eq!(serialized, "\"guest\"");

        let deserialized: Owner = serde_json::from_str("\"guest\"").unwrap();
        assert_eq!(deserialized, Owner::Guest);
    }

    #[test]
    fn serializes_user_as_plain_identifier() {
        let owner = Owner::User(UserId::new("uid-42").unwrap());

        let serialized = serde_json::to_string(&owner).unwrap();
        assert_eq!(serialized, "\"uid-42\"");

        let deserialized: Owner = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, owner);
    }
}
