use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::owner::GUEST_OWNER_SENTINEL;


/// Identifier of an [`OwnedEntity`][crate::OwnedEntity].
pub trait EntityId:
    Copy
    + Eq
    + std::hash::Hash
    + std::fmt::Debug
    + std::fmt::Display
    + Serialize
    + serde::de::DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Generates a new random identifier (used by the local store,
    /// the remote store lets the database assign identifiers).
    fn generate() -> Self;
}


macro_rules! create_uuid_newtype {
    ($struct_name:ident) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $struct_name(#[serde(with = "uuid::serde::simple")] pub(crate) uuid::Uuid);

        impl $struct_name {
            #[inline]
            pub fn new(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generates a new random (version 4) identifier.
            #[inline]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            #[inline]
            pub fn into_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl EntityId for $struct_name {
            #[inline]
            fn generate() -> Self {
                Self::generate()
            }
        }

        impl std::str::FromStr for $struct_name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let inner_uuid = <uuid::Uuid as std::str::FromStr>::from_str(s)?;

                Ok(Self(inner_uuid))
            }
        }

        impl std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                uuid::fmt::Simple::from_uuid(self.0).fmt(f)
            }
        }
    };
}


create_uuid_newtype!(TopicId);

create_uuid_newtype!(VocabularyItemId);

create_uuid_newtype!(WordTypeId);



#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("user identifier is empty")]
    Empty,

    #[error("user identifier \"{}\" is reserved", .reserved)]
    Reserved { reserved: Cow<'static, str> },
}


/// Identifier of an authenticated user.
///
/// This is the stable account identifier issued by the identity provider
/// and the canonical primary key of a user profile. E-mail addresses are
/// profile attributes, never keys.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new<S>(provider_account_id: S) -> Result<Self, UserIdError>
    where
        S: Into<String>,
    {
        let provider_account_id: String = provider_account_id.into();
        let trimmed = provider_account_id.trim();

        if trimmed.is_empty() {
            return Err(UserIdError::Empty);
        }

        if trimmed == GUEST_OWNER_SENTINEL {
            return Err(UserIdError::Reserved {
                reserved: Cow::Borrowed(GUEST_OWNER_SENTINEL),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn user_id_rejects_empty_and_reserved_values() {
        assert_eq!(UserId::new("   "), Err(UserIdError::Empty));
        assert!(matches!(
            UserId::new("guest"),
            Err(UserIdError::Reserved { .. })
        ));

        let user_id = UserId::new(" abc123 ").unwrap();
        assert_eq!(user_id.as_str(), "abc123");
    }

    #[test]
    fn uuid_newtypes_round_trip_through_display() {
        let topic_id = TopicId::generate();
        let parsed: TopicId = topic_id.to_string().parse().unwrap();

        assert_eq!(topic_id, parsed);
        assert!(!topic_id.to_string().contains('-'));
    }
}
