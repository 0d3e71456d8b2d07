//! Raw response schema of the Free Dictionary API
//! (`GET /api/v2/entries/en/{word}`), which returns a JSON array of entries.

use serde::{Deserialize, Serialize};


#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub word: String,

    /// Headline transcription, not tied to an accent.
    #[serde(default)]
    pub phonetic: Option<String>,

    #[serde(default)]
    pub phonetics: Vec<RawPhonetic>,

    #[serde(default)]
    pub meanings: Vec<RawMeaning>,
}


#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct RawPhonetic {
    #[serde(default)]
    pub text: Option<String>,

    /// Audio file URL. The API sends an empty string when there is none.
    #[serde(default)]
    pub audio: Option<String>,
}


#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawMeaning {
    pub part_of_speech: String,

    #[serde(default)]
    pub definitions: Vec<RawDefinition>,
}


#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct RawDefinition {
    pub definition: String,

    #[serde(default)]
    pub example: Option<String>,
}
