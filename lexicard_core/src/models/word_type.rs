use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{id::WordTypeId, owner::Owner, OwnedEntity};


/// Default display color of a word type that was created without one.
pub const DEFAULT_WORD_TYPE_COLOR: &str = "gray";


/// A user-defined word tag (e.g. "phrasal verb") with a display color.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WordType {
    pub id: WordTypeId,

    pub name: String,

    pub color: String,

    #[serde(rename = "ownerId")]
    pub owner: Owner,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WordTypeDraft {
    pub name: String,
    pub color: String,
}

impl WordTypeDraft {
    pub fn new<N>(name: N, color: Option<String>) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            color: color.unwrap_or_else(|| DEFAULT_WORD_TYPE_COLOR.to_string()),
        }
    }
}


#[derive(Deserialize, Clone, Default, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct WordTypePatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl WordTypePatch {
    pub fn has_any_values_to_update(&self) -> bool {
        self.name.is_some() || self.color.is_some()
    }
}


impl OwnedEntity for WordType {
    type Id = WordTypeId;
    type Draft = WordTypeDraft;
    type Patch = WordTypePatch;

    const STORAGE_KEY: &'static str = "lexicard.word_types";
    const KIND: &'static str = "word type";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(
        id: WordTypeId,
        owner: Owner,
        created_at: DateTime<Utc>,
        draft: WordTypeDraft,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            color: draft.color,
            owner,
            created_at,
            updated_at: created_at,
        }
    }

    fn apply_patch(&mut self, patch: WordTypePatch, updated_at: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }

        if let Some(color) = patch.color {
            self.color = color;
        }

        self.updated_at = updated_at;
    }
}
