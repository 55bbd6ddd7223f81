use clap::Parser;
use sheet_etl::config::{project_root, TranslationArgs};
use sheet_etl::core::RowSource;
use sheet_etl::utils::{logger, validation::Validate};
use sheet_etl::{
    CsvFileSource, EtlEngine, EtlError, LoadOutcome, LocalStorage, OutputOptions,
    SheetExportSource, SheetTab, SheetsConfig, TranslationPipeline,
};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    let args = TranslationArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🌱 Translation card generator");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    if let Err(e) = run(&args).await {
        tracing::error!("❌ Generation failed: {} (Category: {:?})", e, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &TranslationArgs) -> Result<(), EtlError> {
    args.validate()?;
    let config = SheetsConfig::load_or_default(args.config.as_deref())?;
    config.validate()?;

    let output_path = match &args.output {
        Some(output) => PathBuf::from(output),
        None => project_root(&std::env::current_dir()?).join(&config.translations.output),
    };
    let (storage, output) = output_target(&output_path, args)?;

    let category_column = args
        .category_column
        .clone()
        .unwrap_or_else(|| config.translations.category_column.clone());

    match &args.csv_file {
        Some(path) => convert(CsvFileSource::new(path), storage, category_column, output).await,
        None => {
            let spreadsheet_id = args
                .spreadsheet_id
                .as_deref()
                .unwrap_or(&config.translations.spreadsheet_id);
            let gid = args
                .sheet_gid
                .as_deref()
                .unwrap_or(&config.translations.sheet_gid);
            tracing::info!("📊 Spreadsheet ID: {}", spreadsheet_id);
            tracing::info!("📋 Sheet GID: {}", gid);

            let source =
                SheetExportSource::new(spreadsheet_id, vec![SheetTab::new("Phrases", Some(gid))]);
            convert(source, storage, category_column, output).await
        }
    }
}

/// Storage rooted at the output file's directory, plus the bare file name.
fn output_target(path: &Path, args: &TranslationArgs) -> Result<(LocalStorage, OutputOptions), EtlError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| EtlError::InvalidConfigValueError {
            field: "output".to_string(),
            value: path.display().to_string(),
            reason: "Output path must name a file".to_string(),
        })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let output = OutputOptions {
        file_name,
        dry_run: args.dry_run,
        backup: !args.no_backup,
    };
    Ok((LocalStorage::new(dir), output))
}

async fn convert<R: RowSource>(
    source: R,
    storage: LocalStorage,
    category_column: String,
    output: OutputOptions,
) -> Result<(), EtlError> {
    let pipeline = TranslationPipeline::new(source, storage, Some(category_column), output);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await? {
        LoadOutcome::DryRun { json } => {
            println!("{}", json);
        }
        LoadOutcome::Written { path, backup, .. } => {
            if let Some(backup) = backup {
                println!("📦 Backed up existing file to: {}", backup);
            }
            println!("✅ Translation cards generated successfully!");
            println!("📁 Output saved to: {}", path);
        }
    }
    Ok(())
}
