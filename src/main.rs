use std::{
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use tracing::{
    error,
    info,
};
use vocab_sync::{
    anki::{
        self,
        bootstrap,
        template,
        AnkiClient,
    },
    core::{
        logging,
        models::load_entries,
        SyncError,
    },
    sync::{
        execute_plan,
        reconcile,
    },
};

#[derive(Parser)]
#[command(
    name = "vocab-sync",
    version,
    about = "Mirrors a vocabulary JSON export into an Anki deck over AnkiConnect"
)]
struct Args {
    /// Path to the vocabulary JSON export
    input: PathBuf,

    /// Font file to upload into Anki's shared media store
    #[arg(long)]
    font: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), SyncError> {
    println!("Start syncing...");

    if !args.input.exists() {
        return Err(SyncError::FileNotFound(args.input.display().to_string()));
    }
    let entries = load_entries(&args.input)?;
    info!("loaded {} entries from {}", entries.len(), args.input.display());

    let client = AnkiClient::new()?;
    if !anki::wait_awake(&client, 2, 3).await? {
        return Err(SyncError::GatewayUnavailable);
    }

    bootstrap::ensure_deck(&client).await.map_err(|e| SyncError::Bootstrap(Box::new(e)))?;
    if let Some(font) = &args.font {
        bootstrap::upload_font(&client, font)
            .await
            .map_err(|e| SyncError::Bootstrap(Box::new(e)))?;
    }

    let query = format!("deck:\"{}\"", template::DECK_NAME);
    let snapshot = client
        .notes_info(&query)
        .await
        .map_err(|e| SyncError::SnapshotFetch(Box::new(e)))?;
    info!("fetched {} existing notes", snapshot.len());

    let plan = reconcile(&entries, &snapshot);
    info!(
        "plan: {} to add, {} to update, {} to delete",
        plan.to_add.len(),
        plan.to_update.len(),
        plan.to_delete.len()
    );

    execute_plan(&client, &plan).await?;

    println!("Sync completed successfully!");
    Ok(())
}
