// Adapters layer: concrete implementations for external systems (files, HTTP, CSV).

pub mod csv_table;
pub mod file_source;
pub mod sheets;
pub mod storage;

pub use file_source::CsvFileSource;
pub use sheets::{SheetExportSource, SheetTab};
pub use storage::LocalStorage;
