use clap::Parser;
use sheet_etl::adapters::sheets::sheet_id_from_url;
use sheet_etl::config::{project_root, ActivityArgs};
use sheet_etl::core::RowSource;
use sheet_etl::utils::{logger, validation::Validate};
use sheet_etl::{
    ActivityPipeline, CsvFileSource, EtlEngine, EtlError, LoadOutcome, LocalStorage,
    OutputOptions, SheetExportSource, SheetsConfig,
};
use std::path::PathBuf;

const GENERATED_BY: &str = "sheet-etl activities";

#[tokio::main]
async fn main() {
    let args = ActivityArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Converting activities sheet ({:?} schema)", args.schema);
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    if let Err(e) = run(&args).await {
        tracing::error!("❌ Conversion failed: {} (Category: {:?})", e, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &ActivityArgs) -> Result<(), EtlError> {
    args.validate()?;
    let config = SheetsConfig::load_or_default(args.config.as_deref())?;
    config.validate()?;

    let output_dir = match &args.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => project_root(&std::env::current_dir()?).join(&config.activities.output_dir),
    };
    let storage = LocalStorage::new(output_dir);
    let output = OutputOptions {
        file_name: args.output_file_name().to_string(),
        dry_run: args.dry_run,
        backup: !args.no_backup,
    };

    match &args.csv_file {
        Some(path) => convert(CsvFileSource::new(path), storage, args, output).await,
        None => {
            let sheet_url = args
                .sheet_url
                .as_deref()
                .unwrap_or(&config.activities.sheet_url);
            let source = SheetExportSource::new(
                sheet_id_from_url(sheet_url)?,
                config.activities.tabs_for(args.schema),
            );
            convert(source, storage, args, output).await
        }
    }
}

async fn convert<R: RowSource>(
    source: R,
    storage: LocalStorage,
    args: &ActivityArgs,
    output: OutputOptions,
) -> Result<(), EtlError> {
    let pipeline = ActivityPipeline::new(source, storage, args.schema, GENERATED_BY, output);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await? {
        LoadOutcome::DryRun { json } => {
            println!("{}", json);
        }
        LoadOutcome::Written { path, backup, .. } => {
            if let Some(backup) = backup {
                println!("💾 Backup created: {}", backup);
            }
            println!("✅ Conversion completed successfully!");
            println!("📁 Output saved to: {}", path);
        }
    }
    Ok(())
}
