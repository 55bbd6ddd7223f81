pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{CsvFileSource, LocalStorage, SheetExportSource, SheetTab};
pub use app::{ActivityPipeline, OutputOptions, TranslationPipeline};
pub use config::SheetsConfig;
pub use core::activity_builder::ActivitySchema;
pub use core::etl::EtlEngine;
pub use domain::model::LoadOutcome;
pub use utils::error::{EtlError, Result};
