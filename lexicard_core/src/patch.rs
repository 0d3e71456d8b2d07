//! Parsing of untyped partial updates.
//!
//! Typed patches ([`OwnedEntity::Patch`]) simply have no identity fields.
//! Untyped patches (e.g. a JSON object typed in on the command line) may still
//! name them, in which case those keys are dropped before deserialization.
//!
//! [`OwnedEntity::Patch`]: crate::OwnedEntity::Patch

use serde::de::DeserializeOwned;
use thiserror::Error;


/// Keys that a partial update is never allowed to change, in both
/// snake_case and the camelCase spelling used by the stored JSON.
pub const PROTECTED_FIELDS: &[&str] = &[
    "id",
    "owner",
    "ownerId",
    "owner_id",
    "userId",
    "user_id",
    "createdAt",
    "created_at",
    "normalizedWord",
    "normalized_word",
];


#[derive(Debug, Error)]
pub enum PatchParseError {
    #[error("a partial update must be a JSON object")]
    NotAnObject,

    #[error("invalid partial update")]
    InvalidPatch {
        #[source]
        error: serde_json::Error,
    },
}


/// Result of [`parse_patch`]: the typed patch and the protected keys that were dropped.
#[derive(Debug)]
pub struct ParsedPatch<P> {
    pub patch: P,
    pub dropped_fields: Vec<String>,
}


/// Parses an untyped JSON partial update into a typed patch,
/// silently dropping any attempt to change identity fields.
pub fn parse_patch<P>(value: serde_json::Value) -> Result<ParsedPatch<P>, PatchParseError>
where
    P: DeserializeOwned,
{
    let serde_json::Value::Object(mut fields) = value else {
        return Err(PatchParseError::NotAnObject);
    };

    let mut dropped_fields = Vec::new();
    for protected_field in PROTECTED_FIELDS {
        if fields.remove(*protected_field).is_some() {
            dropped_fields.push((*protected_field).to_string());
        }
    }

    let patch = serde_json::from_value(serde_json::Value::Object(fields))
        .map_err(|error| PatchParseError::InvalidPatch { error })?;

    Ok(ParsedPatch {
        patch,
        dropped_fields,
    })
}


#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::models::topic::TopicPatch;

    #[test]
    fn drops_identity_fields() {
        let parsed = parse_patch::<TopicPatch>(json!({
            "id": "00000000000000000000000000000000",
            "ownerId": "someone-else",
            "createdAt": "2020-01-01T00:00:00Z",
            "label": "Food",
        }))
        .unwrap();

        assert_eq!(parsed.patch.label.as_deref(), Some("Food"));
        assert_eq!(parsed.dropped_fields.len(), 3);
        assert!(parsed.dropped_fields.contains(&"ownerId".to_string()));
    }

    #[test]
    fn refuses_non_objects() {
        assert!(matches!(
            parse_patch::<TopicPatch>(json!(["label"])),
            Err(PatchParseError::NotAnObject)
        ));
    }
}
