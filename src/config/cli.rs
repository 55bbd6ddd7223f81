use crate::core::activity_builder::ActivitySchema;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

pub const DEFAULT_ACTIVITIES_FILE: &str = "default-activities.json";

#[derive(Debug, Clone, Parser)]
#[command(name = "sheet-etl")]
#[command(about = "Convert Google Sheets CSV to activities JSON")]
pub struct ActivityArgs {
    /// CSV file path (reads the Google Sheet when omitted)
    pub csv_file: Option<String>,

    /// Sheet layout: `typed` (experiential/financial/quote) or `legacy`
    #[arg(long, value_enum, default_value_t = ActivitySchema::Typed)]
    pub schema: ActivitySchema,

    /// Replace default-activities.json (creates a backup)
    #[arg(long)]
    pub replace_default: bool,

    /// Output filename
    #[arg(long, default_value = "imported-activities.json")]
    pub filename: String,

    /// Output directory (default: <project root>/src/data/activities)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Print the JSON instead of writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the backup when overwriting files
    #[arg(long)]
    pub no_backup: bool,

    /// Spreadsheet URL or id, overriding the config file
    #[arg(long)]
    pub sheet_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ActivityArgs {
    pub fn output_file_name(&self) -> &str {
        if self.replace_default {
            DEFAULT_ACTIVITIES_FILE
        } else {
            &self.filename
        }
    }
}

impl Validate for ActivityArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_json_filename("filename", self.output_file_name())?;
        if let Some(dir) = &self.output_dir {
            validation::validate_path("output_dir", dir)?;
        }
        if let Some(csv_file) = &self.csv_file {
            validation::validate_path("csv_file", csv_file)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "translation-cards")]
#[command(about = "Generate translation cards JSON from Google Sheets")]
pub struct TranslationArgs {
    /// CSV file path (reads the Google Sheet when omitted)
    pub csv_file: Option<String>,

    /// Google Spreadsheet ID
    #[arg(long)]
    pub spreadsheet_id: Option<String>,

    /// Sheet GID (tab identifier)
    #[arg(long)]
    pub sheet_gid: Option<String>,

    /// Output JSON file path
    #[arg(long)]
    pub output: Option<String>,

    /// Name of the category column in the spreadsheet
    #[arg(long)]
    pub category_column: Option<String>,

    /// Disable backup of an existing file
    #[arg(long)]
    pub no_backup: bool,

    /// Print the JSON instead of writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Validate for TranslationArgs {
    fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            validation::validate_json_filename("output", output)?;
        }
        if let Some(id) = &self.spreadsheet_id {
            validation::validate_non_empty_string("spreadsheet_id", id)?;
        }
        Ok(())
    }
}
