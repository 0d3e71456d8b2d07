use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{id::TopicId, owner::Owner, OwnedEntity};


/// A user-defined category for grouping vocabulary items.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,

    pub label: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Display color identifier (e.g. `"teal"` or `"#0f766e"`).
    #[serde(default)]
    pub color: Option<String>,

    /// Display icon identifier.
    #[serde(default)]
    pub icon: Option<String>,

    #[serde(rename = "ownerId")]
    pub owner: Owner,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TopicDraft {
    pub label: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl TopicDraft {
    pub fn new<L>(label: L) -> Self
    where
        L: Into<String>,
    {
        Self {
            label: label.into(),
            description: None,
            color: None,
            icon: None,
        }
    }
}


#[derive(Deserialize, Clone, Default, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicPatch {
    pub label: Option<String>,

    #[serde(with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,

    #[serde(with = "::serde_with::rust::double_option")]
    pub color: Option<Option<String>>,

    #[serde(with = "::serde_with::rust::double_option")]
    pub icon: Option<Option<String>>,
}

impl TopicPatch {
    pub fn has_any_values_to_update(&self) -> bool {
        self.label.is_some()
            || self.description.is_some()
            || self.color.is_some()
            || self.icon.is_some()
    }
}


impl OwnedEntity for Topic {
    type Id = TopicId;
    type Draft = TopicDraft;
    type Patch = TopicPatch;

    const STORAGE_KEY: &'static str = "lexicard.topics";
    const KIND: &'static str = "topic";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: TopicId, owner: Owner, created_at: DateTime<Utc>, draft: TopicDraft) -> Self {
        Self {
            id,
            label: draft.label,
            description: draft.description,
            color: draft.color,
            icon: draft.icon,
            owner,
            created_at,
            updated_at: created_at,
        }
    }

    fn apply_patch(&mut self, patch: TopicPatch, updated_at: DateTime<Utc>) {
        if let Some(label) = patch.label {
            self.label = label;
        }

        if let Some(description) = patch.description {
            self.description = description;
        }

        if let Some(color) = patch.color {
            self.color = color;
        }

        if let Some(icon) = patch.icon {
            self.icon = icon;
        }

        self.updated_at = updated_at;
    }
}
