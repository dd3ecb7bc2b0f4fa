use std::{
    fs,
    path::Path,
};

use serde::Deserialize;

use super::errors::SyncError;

/// One vocabulary entry from the export file. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    pub id: String,
    #[serde(default)]
    pub note: Option<String>,
    pub sentence: String,
    pub pieces: Vec<PhoneticPiece>,
    pub translation: String,
    #[serde(default)]
    pub audio_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneticPiece {
    pub word: String,
    #[serde(rename = "IPA")]
    pub ipa: String,
    #[serde(default)]
    pub index: Option<u32>,
}

pub fn load_entries(path: &Path) -> Result<Vec<VocabEntry>, SyncError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| SyncError::FailedToLoadFile(format!("{}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&raw)?)
}
