pub mod activity_pipeline;
pub mod translation_pipeline;

use crate::adapters::storage::backup_existing;
use crate::core::Storage;
use crate::domain::model::LoadOutcome;
use crate::utils::error::Result;
use chrono::Utc;

/// Where and how a pipeline writes its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Path relative to the storage root.
    pub file_name: String,
    /// Print the JSON instead of writing it.
    pub dry_run: bool,
    /// Copy an existing file aside before overwriting it.
    pub backup: bool,
}

pub(crate) async fn write_document<S: Storage>(
    storage: &S,
    options: &OutputOptions,
    json: String,
) -> Result<LoadOutcome> {
    tracing::info!("Output file: {}", storage.location(&options.file_name));

    if options.dry_run {
        tracing::info!("DRY RUN - nothing written");
        return Ok(LoadOutcome::DryRun { json });
    }

    let backup = if options.backup {
        backup_existing(storage, &options.file_name, Utc::now().timestamp()).await?
    } else {
        None
    };

    storage
        .write_file(&options.file_name, json.as_bytes())
        .await?;

    let path = storage.location(&options.file_name);
    tracing::info!("✅ JSON saved to: {}", path);
    tracing::info!("📊 File size: {} bytes", json.len());

    Ok(LoadOutcome::Written {
        path,
        bytes: json.len(),
        backup,
    })
}
