use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use super::template;

/// AnkiConnect response envelope. `error` is null on success; a non-null
/// value of any shape is a reported failure.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NoteField {
    pub value: String,
    #[serde(default)]
    pub order: u32,
}

/// A note as reported by `notesInfo`. The store owns it; this tool only
/// reads a snapshot and issues mutation commands against `note_id`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RemoteNote {
    pub note_id: u64,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub fields: HashMap<String, NoteField>,
}

impl RemoteNote {
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|field| field.value.as_str())
    }

    /// The external identifier stored on the note. A missing or empty value
    /// marks the note as untracked.
    pub fn db_id(&self) -> Option<&str> {
        self.field_value(template::FIELD_DB_ID).filter(|value| !value.is_empty())
    }
}

/// The fixed 6-field payload for note creation. Audio stays empty here and
/// is populated by the attached media directive, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteFields {
    #[serde(rename = "Sentence")]
    pub sentence: String,
    #[serde(rename = "Translation")]
    pub translation: String,
    #[serde(rename = "Note")]
    pub note: String,
    #[serde(rename = "dbID")]
    pub db_id: String,
    #[serde(rename = "IPA")]
    pub ipa: String,
    #[serde(rename = "Audio")]
    pub audio: String,
}

/// Tells Anki to download `url` into its media store as `filename` and
/// reference it from the listed fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaDirective {
    pub url: String,
    pub filename: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub deck_name: String,
    pub model_name: String,
    pub fields: NoteFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Vec<MediaDirective>>,
}

/// A minimal update: only the fields whose computed value differs from the
/// remote value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldUpdate {
    pub id: u64,
    pub fields: HashMap<String, String>,
}
