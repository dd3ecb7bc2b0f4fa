use std::time::Duration;

use tokio::time::sleep;
use tracing::{
    info,
    warn,
};

use crate::core::SyncError;

pub mod api;
pub mod bootstrap;
pub mod template;
pub mod types;

pub use api::AnkiClient;

/// Probes AnkiConnect with the `version` action until it answers or the
/// attempts run out. The probe is idempotent, so retrying it is safe;
/// mutating actions are never retried.
pub async fn wait_awake(
    client: &AnkiClient,
    wait_time: u64,
    max_attempts: u32,
) -> Result<bool, SyncError> {
    for attempt in 1..=max_attempts {
        match client.version().await {
            Ok(version) => {
                info!("AnkiConnect is online. Version: {}", version);
                return Ok(true);
            }
            Err(err) => {
                warn!(
                    "AnkiConnect attempt {} of {} failed. Retrying in {} seconds... Error: {}",
                    attempt, max_attempts, wait_time, err
                );
                if attempt < max_attempts {
                    sleep(Duration::from_secs(wait_time)).await;
                }
            }
        }
    }
    Ok(false)
}
