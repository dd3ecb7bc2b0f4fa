use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{
    json,
    Value,
};

use super::types::{
    ApiResponse,
    FieldUpdate,
    NewNote,
    RemoteNote,
};
use crate::core::SyncError;

pub const ANKI_CONNECT_URL: &str = "http://127.0.0.1:8765";
pub const API_VERSION: u32 = 6;

/// Single gateway to AnkiConnect. Every call is one attempt; retries are a
/// caller policy and mutating actions are never retried.
pub struct AnkiClient {
    client: Client,
    endpoint: String,
}

impl AnkiClient {
    pub fn new() -> Result<Self, SyncError> {
        Self::with_endpoint(ANKI_CONNECT_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| SyncError::Custom(format!("HTTP client build failed: {e}")))?;
        Ok(Self { client, endpoint: endpoint.into() })
    }

    /// Sends `{action, version, params}` and unwraps the response envelope.
    /// A `null` result comes back as `None`; any failure surfaces as
    /// `SyncError::Gateway` with a uniform message.
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Option<Value>,
    ) -> Result<Option<T>, SyncError> {
        let mut body = serde_json::Map::new();
        body.insert("action".to_string(), Value::String(action.to_string()));
        body.insert("version".to_string(), Value::Number(API_VERSION.into()));
        if let Some(params) = params {
            body.insert("params".to_string(), params);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Gateway(e.to_string()))?;

        let envelope: ApiResponse<T> =
            response.json().await.map_err(|e| SyncError::Gateway(e.to_string()))?;

        if let Some(error) = envelope.error {
            return Err(SyncError::Gateway(reported_error_message(&error).to_string()));
        }

        Ok(envelope.result)
    }

    pub async fn version(&self) -> Result<u32, SyncError> {
        Ok(self.invoke("version", None).await?.unwrap_or_default())
    }

    pub async fn deck_names(&self) -> Result<Vec<String>, SyncError> {
        Ok(self.invoke("deckNames", None).await?.unwrap_or_default())
    }

    pub async fn create_deck(&self, deck: &str) -> Result<(), SyncError> {
        self.invoke::<Value>("createDeck", Some(json!({ "deck": deck }))).await?;
        Ok(())
    }

    pub async fn create_model(
        &self,
        model_name: &str,
        in_order_fields: &[&str],
        css: &str,
        card_templates: Value,
    ) -> Result<(), SyncError> {
        let params = json!({
            "modelName": model_name,
            "inOrderFields": in_order_fields,
            "css": css,
            "isCloze": false,
            "cardTemplates": card_templates,
        });
        self.invoke::<Value>("createModel", Some(params)).await?;
        Ok(())
    }

    pub async fn notes_info(&self, query: &str) -> Result<Vec<RemoteNote>, SyncError> {
        let params = json!({ "query": query });
        Ok(self.invoke("notesInfo", Some(params)).await?.unwrap_or_default())
    }

    pub async fn add_notes(&self, notes: &[NewNote]) -> Result<(), SyncError> {
        self.invoke::<Value>("addNotes", Some(json!({ "notes": notes }))).await?;
        Ok(())
    }

    pub async fn update_note_fields(&self, update: &FieldUpdate) -> Result<(), SyncError> {
        self.invoke::<Value>("updateNoteFields", Some(json!({ "note": update }))).await?;
        Ok(())
    }

    pub async fn delete_notes(&self, note_ids: &[u64]) -> Result<(), SyncError> {
        self.invoke::<Value>("deleteNotes", Some(json!({ "notes": note_ids }))).await?;
        Ok(())
    }

    /// Stores a local file in Anki's media collection. Path-based variant so
    /// nothing gets base64-encoded through the envelope.
    pub async fn store_media_file(&self, filename: &str, path: &str) -> Result<(), SyncError> {
        let params = json!({ "filename": filename, "path": path });
        self.invoke::<Value>("storeMediaFile", Some(params)).await?;
        Ok(())
    }
}

/// Message extraction for an envelope-reported error, in fixed priority
/// order: an object's `message` property, then a bare string, then a generic
/// fallback. Transport errors never reach here; their own display string is
/// used directly, which keeps the overall priority at
/// error-message > `message` property > string > fallback.
fn reported_error_message(error: &Value) -> &str {
    if let Some(message) = error.get("message").and_then(Value::as_str) {
        return message;
    }
    if let Some(message) = error.as_str() {
        return message;
    }
    "Something went wrong"
}
