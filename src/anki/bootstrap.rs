use std::path::Path;

use tracing::info;

use super::{
    api::AnkiClient,
    template,
};
use crate::core::SyncError;

/// Creates the deck and its note model when the deck name is absent.
/// Deck name is the only identity checked; an existing deck is never
/// upgraded to a newer model schema.
pub async fn ensure_deck(client: &AnkiClient) -> Result<(), SyncError> {
    let decks = client.deck_names().await?;
    if decks.iter().any(|deck| deck == template::DECK_NAME) {
        info!("deck \"{}\" already exists", template::DECK_NAME);
        return Ok(());
    }

    info!(
        "creating deck \"{}\" with model \"{}\"",
        template::DECK_NAME,
        template::MODEL_NAME
    );
    client.create_deck(template::DECK_NAME).await?;
    client
        .create_model(
            template::MODEL_NAME,
            &template::FIELD_ORDER,
            template::CARD_CSS,
            template::card_templates(),
        )
        .await?;

    Ok(())
}

/// Uploads a font file into Anki's shared media store. The filename gets an
/// underscore prefix so Anki's unused-media check leaves it alone.
pub async fn upload_font(client: &AnkiClient, font: &Path) -> Result<(), SyncError> {
    let file_name = font
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| SyncError::Custom(format!("Invalid font path: {}", font.display())))?;

    let filename = if file_name.starts_with('_') {
        file_name.to_string()
    } else {
        format!("_{file_name}")
    };

    let path = font.canonicalize()?;
    info!("uploading shared font {}", filename);
    client.store_media_file(&filename, path.to_string_lossy().as_ref()).await
}
