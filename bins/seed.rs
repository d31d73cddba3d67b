use anyhow::Context;
use tracing::info;

use service::{seed, FileStorage, RecordStore};

/// Maintenance entry point: ensure the data directory exists, open the
/// collection files, and seed the sample catalog when it is empty.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::utils::logging::init_logging_default();

    let cfg = configs::AppConfig::load_and_validate().context("load configuration")?;
    common::env::ensure_env(&cfg.storage.data_dir).await?;

    let store = FileStorage::new(&cfg.storage)
        .await
        .map_err(|e| anyhow::anyhow!("open record store: {e}"))?;
    seed::initialize(&store)
        .await
        .map_err(|e| anyhow::anyhow!("seed catalog: {e}"))?;

    let books = store.list_books().await;
    info!(data_dir = %cfg.storage.data_dir, books = books.len(), "record store ready");
    for book in &books {
        info!(id = book.id, title = %book.title, author = %book.author, "catalog entry");
    }
    Ok(())
}
